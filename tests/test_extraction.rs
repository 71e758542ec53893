use recipe_capture::{
    extract, Cuisine, KeywordTables, Placeholders, RecipeTextExtractor, DEFAULT_IMAGE,
};

const SOUP_POST: &str = "30分钟快手晚餐 —— 家常版酸汤肥牛🍽️
酸酸辣辣超下饭！

【材料】
肥牛卷 200g
金针菇（一把）
酸菜、小米辣
【调味】
盐，白胡椒

🥣 做法：
1. 金针菇洗净铺在碗底
2. 锅中烧水，肥牛焯水备用
- 撇去浮沫
3. 加入酸菜和调味煮开
📝 小贴士：肥牛不要煮太久";

fn assert_complete(text: &str) {
    let recipe = extract(text, None, None);

    assert!(!recipe.title.is_empty(), "empty title for {:?}", text);
    assert!(!recipe.ingredients.is_empty());
    assert!(!recipe.steps.is_empty());
    assert_ne!(recipe.cuisine, Cuisine::All);

    for ingredient in &recipe.ingredients {
        let chars = ingredient.chars().count();
        assert!(chars > 0 && chars <= 50, "{:?}", ingredient);
    }
    for step in &recipe.steps {
        assert!(step.len() > 5 && step.chars().count() <= 400, "{:?}", step);
    }
}

#[test]
fn test_full_social_post() {
    let recipe = extract(SOUP_POST, Some("https://cdn.example.com/soup.jpg"), None);

    assert_eq!(recipe.title, "家常版酸汤肥牛");
    assert_eq!(
        recipe.ingredients,
        vec!["肥牛卷 200g", "金针菇", "酸菜", "小米辣", "盐", "白胡椒"]
    );
    assert_eq!(
        recipe.steps,
        vec![
            "金针菇洗净铺在碗底",
            "锅中烧水，肥牛焯水备用；撇去浮沫",
            "加入酸菜和调味煮开"
        ]
    );
    assert_eq!(recipe.image, "https://cdn.example.com/soup.jpg");
    assert_eq!(recipe.cuisine, Cuisine::Western);
}

#[test]
fn test_structured_input() {
    let recipe = extract("【材料】牛肉，豆腐\n做法：\n1. 切牛肉\n2. 炒豆腐", None, None);
    assert_eq!(recipe.ingredients, vec!["牛肉", "豆腐"]);
    assert_eq!(recipe.steps, vec!["切牛肉", "炒豆腐"]);
}

#[test]
fn test_title_with_hook_dash_and_emoji() {
    let recipe = extract("30分钟快手晚餐 —— 家常版酸汤肥牛🍽️", None, None);
    assert_eq!(recipe.title, "家常版酸汤肥牛");
}

#[test]
fn test_multi_line_post_prefers_dish_name() {
    let recipe = extract(
        "周末必做 —— 红烧排骨\n【材料】排骨，葱\n做法：\n1. 排骨焯水备用",
        None,
        None,
    );
    assert_eq!(recipe.title, "红烧排骨");
    assert_eq!(recipe.ingredients, vec!["排骨", "葱"]);
    assert_eq!(recipe.steps, vec!["排骨焯水备用"]);
}

#[test]
fn test_long_chinese_entries_survive() {
    let long_step = format!("{}最后撒上葱花出锅", "酸菜放入锅中和肥牛一起小火慢煮".repeat(7));
    let text = format!(
        "【材料】肥牛，东北酸菜切丝后用清水冲洗两遍去除咸味，豆腐\n做法：\n1. {}\n2. 大火快炒至八成熟",
        long_step
    );

    let recipe = extract(&text, None, None);
    assert_eq!(
        recipe.ingredients,
        vec!["肥牛", "东北酸菜切丝后用清水冲洗两遍去除咸味", "豆腐"]
    );
    assert_eq!(recipe.steps, vec![long_step.as_str(), "大火快炒至八成熟"]);
}

#[test]
fn test_no_structure_at_all() {
    let recipe = extract("just some random text with no markers", None, None);
    let placeholders = Placeholders::default();

    assert_eq!(recipe.ingredients, vec![placeholders.ingredients]);
    assert_eq!(recipe.steps, vec![placeholders.steps]);
    assert_eq!(recipe.title, "Untitled Recipe");
    assert_eq!(recipe.cuisine, Cuisine::Western);
    assert_eq!(recipe.image, DEFAULT_IMAGE);
}

#[test]
fn test_no_structure_uses_url_title() {
    let recipe = extract(
        "just some random text with no markers",
        None,
        Some("https://example.com/recipes/hot-and-sour-soup"),
    );
    assert_eq!(recipe.title, "hot and sour soup");
}

#[test]
fn test_out_of_order_numbering() {
    let recipe = extract("做法：\n2. step two\n1. step one\n3. step three", None, None);
    assert_eq!(recipe.steps, vec!["step one", "step two", "step three"]);

    let recipe = extract("3. step three\n1. step one\n2. step two", None, None);
    assert_eq!(recipe.steps, vec!["step one", "step two", "step three"]);
}

#[test]
fn test_action_verb_excluded_from_ingredients() {
    let recipe = extract("【材料】葱花，炒好的葱花，鸡蛋\n做法：\n1. 打散鸡蛋", None, None);
    assert_eq!(recipe.ingredients, vec!["葱花", "鸡蛋"]);
}

#[test]
fn test_duplicate_ingredient_kept_once() {
    let recipe = extract("【材料】豆腐，牛肉， 豆腐 \n做法：\n1. 切牛肉片", None, None);
    assert_eq!(recipe.ingredients, vec!["豆腐", "牛肉"]);
}

#[test]
fn test_cuisine_labels() {
    assert_eq!(extract("A classic Italian pasta", None, None).cuisine, Cuisine::Italian);
    assert_eq!(extract("正宗中餐做法", None, None).cuisine, Cuisine::Chinese);
    assert_eq!(extract("Tonkotsu RAMEN at home", None, None).cuisine, Cuisine::Japanese);
    assert_eq!(extract("no keywords here", None, None).cuisine, Cuisine::Western);
}

#[test]
fn test_results_are_always_complete() {
    let inputs = [
        "",
        "   \n\n  ",
        "just some random text with no markers",
        SOUP_POST,
        "做法：",
        "【材料】",
        "1.\n2.\n3.",
        "🍽️🍽️🍽️",
        "——",
        "材料：，，，、、、\n做法：- - -",
    ];

    for input in inputs {
        assert_complete(input);
    }

    let long_line = "很".repeat(500);
    assert_complete(&format!("【材料】{}\n做法：\n1. {}", long_line, long_line));
}

#[test]
fn test_extraction_is_deterministic() {
    assert_eq!(extract(SOUP_POST, None, None), extract(SOUP_POST, None, None));
}

#[test]
fn test_custom_keyword_tables() {
    let keywords = KeywordTables {
        ingredient_labels: vec!["Ingredients".to_string()],
        method_cues: vec!["Method".to_string()],
        action_verbs: vec!["chopped".to_string()],
        ..KeywordTables::default()
    };
    let extractor = RecipeTextExtractor::new(keywords, Placeholders::english());

    let recipe = extractor.extract(
        "Ingredients: flour, chopped onion, butter\nMethod: mix",
        None,
        None,
    );
    assert_eq!(recipe.ingredients, vec!["flour", "butter"]);
    assert_eq!(recipe.steps, vec!["Enter steps manually"]);
}
