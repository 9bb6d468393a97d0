// src/blessings.rs - Bilingual blessing texts shown in the letter panel
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    En,
    Cn,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Cn,
            Language::Cn => Language::En,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Blessing {
    pub en: &'static str,
    pub cn: &'static str,
}

impl Blessing {
    pub fn text(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Cn => self.cn,
        }
    }
}

pub static FESTIVE_BLESSINGS: Lazy<Vec<Blessing>> = Lazy::new(|| {
    vec![
        Blessing {
            en: "Merry Christmas! Hope your gifts are more reliable than your work performance.",
            cn: "🎄“祝你圣诞快乐，希望你的礼物比你的工作能力更靠谱。”",
        },
        Blessing {
            en: "May your Christmas tree this year be more lush than your social life.",
            cn: "🎁“愿你今年的圣诞树比你的人际关系还要茂盛。”",
        },
        Blessing {
            en: "Merry Christmas! Eat well, drink well, and stop using lame excuses to procrastinate next year.",
            cn: "❄️“祝你圣诞节快乐，吃好喝好，明年别再拿烂借口拖延了。”",
        },
        Blessing {
            en: "Hope your holiday lasts longer than your usual productivity peaks.",
            cn: "🎅“希望你的假期比你平时的效率更长一些。”",
        },
        Blessing {
            en: "Wishing you a beautiful mood and a beautiful bank balance; let fate handle the rest.",
            cn: "✨“祝你圣诞心情美丽，存款也美丽，剩下的就随缘吧。”",
        },
        Blessing {
            en: "May your festive spirit be more accurate than your intellectual judgments.",
            cn: "🎉“愿你的节日比你的智商判断更精准。”",
        },
        Blessing {
            en: "Merry Christmas! Please stop pretending you actually understand wine.",
            cn: "🍷“祝你圣诞快乐，别再假装自己很懂酒了。”",
        },
        Blessing {
            en: "Hope your Christmas gifts are a bit more honest than your carefully crafted online persona.",
            cn: "🕯️“希望你的圣诞礼物比你的人设还要诚实一点。”",
        },
        Blessing {
            en: "May all your holiday wishes come true—except for your procrastination, that's here to stay.",
            cn: "🌟“愿你圣诞心想事成，除了拖延症，其他都好。”",
        },
        Blessing {
            en: "Merry Christmas! Keep your socks warm and may the level of people annoying you drop to a record low.",
            cn: "🧦“祝你圣诞节快乐，袜子暖暖，别人烦你的程度降到最低。”",
        },
    ]
});

/// Pick a blessing for a freshly opened letter. Time-seeded index; the
/// selection only needs to feel varied, not be statistically random.
pub fn random_blessing() -> &'static Blessing {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as usize)
        .unwrap_or(0);
    &FESTIVE_BLESSINGS[nanos % FESTIVE_BLESSINGS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_fully_bilingual() {
        assert_eq!(FESTIVE_BLESSINGS.len(), 10);
        for blessing in FESTIVE_BLESSINGS.iter() {
            assert!(!blessing.text(Language::En).is_empty());
            assert!(!blessing.text(Language::Cn).is_empty());
        }
    }

    #[test]
    fn random_blessing_comes_from_the_table() {
        let pick = random_blessing();
        assert!(FESTIVE_BLESSINGS.iter().any(|b| b.en == pick.en));
    }

    #[test]
    fn language_toggle_round_trips() {
        assert_eq!(Language::En.toggled(), Language::Cn);
        assert_eq!(Language::Cn.toggled().toggled(), Language::Cn);
    }
}
