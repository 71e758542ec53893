use crate::model::Cuisine;
use serde::Deserialize;

/// Keyword lists that drive the text heuristics.
///
/// The defaults are tuned for Chinese social-media recipe posts. Every list
/// can be replaced from configuration (`[keywords]` table) without touching
/// the extraction code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// Cues marking the start of the cooking-method section
    pub method_cues: Vec<String>,
    /// Labels of ingredient-bearing sections (`【材料】`, `材料：`, ...)
    pub ingredient_labels: Vec<String>,
    /// Verbs that mark a candidate ingredient as leaked instruction text
    pub action_verbs: Vec<String>,
    /// Descriptive lead-in phrases stripped from the front of ingredients
    pub lead_ins: Vec<String>,
    /// Line prefixes that mark a stray ingredient line in the method section
    pub ingredient_prefixes: Vec<String>,
    /// Verbs that open a new step when no numbering is present
    pub step_starters: Vec<String>,
    /// Words that make a leading line look like a dish title
    pub title_keywords: Vec<String>,
    /// Cuisine keyword sets, checked in order
    pub cuisines: Vec<CuisineKeywords>,
}

/// Keywords that identify one cuisine label.
#[derive(Debug, Clone, Deserialize)]
pub struct CuisineKeywords {
    pub cuisine: Cuisine,
    pub keywords: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            method_cues: owned(&["做法", "步骤", "🥣"]),
            ingredient_labels: owned(&["材料", "配菜", "调味"]),
            action_verbs: owned(&["准备", "焯", "炒", "煮", "加", "放", "倒入"]),
            lead_ins: owned(&[
                "我",
                "根据",
                "自己",
                "准备",
                "爱吃的菜",
                "即可",
                "今天",
                "准备了",
                "和",
            ]),
            ingredient_prefixes: owned(&[
                "肥牛", "酸菜", "豆腐", "白菜", "金针菇", "粉丝", "姜", "葱", "蒜", "花椒", "辣椒",
                "盐", "胡椒", "鸡精",
            ]),
            step_starters: owned(&[
                "焯", "炒", "煮", "烤", "蒸", "加", "放", "倒入", "加入", "放入", "准备", "切", "锅",
                "把", "撒", "泼",
            ]),
            title_keywords: owned(&["肥牛", "酸汤", "家常", "快手", "晚餐", "食谱", "分钟"]),
            cuisines: vec![
                CuisineKeywords {
                    cuisine: Cuisine::Chinese,
                    keywords: owned(&["chinese", "中餐", "中国"]),
                },
                CuisineKeywords {
                    cuisine: Cuisine::Italian,
                    keywords: owned(&["italian", "pasta", "pizza"]),
                },
                CuisineKeywords {
                    cuisine: Cuisine::Japanese,
                    keywords: owned(&["japanese", "sushi", "ramen"]),
                },
                CuisineKeywords {
                    cuisine: Cuisine::Korean,
                    keywords: owned(&["korean", "kimchi", "kbbq"]),
                },
                CuisineKeywords {
                    cuisine: Cuisine::Western,
                    keywords: owned(&["western", "american", "european"]),
                },
            ],
        }
    }
}
