use crate::models::{Category, ResolvedLocation};

const MENU_SYSTEM_PROMPT: &str = "你是一位餐廳助手。\n\
請翻譯並解釋菜單內容，包含菜名、食材和烹飪方式等資訊，內容需精簡但具資訊量，並著重於提供旅客實用的建議。";

const SUPERMARKET_SYSTEM_PROMPT: &str = "你是一位超市與商品助手。\n\
請解說超市的商品、它們的常見用途，以及相關的文化背景。\n\
重點是協助旅客判斷是否值得購買，以及買回去後該如何使用。";

const ATTRACTION_SYSTEM_PROMPT: &str = "你是一位旅遊景點導覽助手。\n\
請解說該景點的歷史、文化背景，以及任何實用的參觀建議。";

const NO_TEXT_PLACEHOLDER: &str = "(沒有提供文字，主要依靠圖片與定位)";
const UNKNOWN_CITY: &str = "Unknown";

pub fn build_system_prompt(category: Category) -> &'static str {
    // Exhaustive over Category: unknown labels are rejected during validation, so no generic fallback
    match category {
        Category::Menu => MENU_SYSTEM_PROMPT,
        Category::Supermarket => SUPERMARKET_SYSTEM_PROMPT,
        Category::Attraction => ATTRACTION_SYSTEM_PROMPT,
    }
}

pub fn build_user_prompt(text: &str, category: Category, location: &ResolvedLocation) -> String {
    let city = location.info.city.as_deref().unwrap_or(UNKNOWN_CITY);
    let question = if text.is_empty() { NO_TEXT_PLACEHOLDER } else { text };

    format!(
        "使用者目前所在地：\n\
         \t•\t國家：{}\n\
         \t•\t地區：{}\n\
         \t•\t城市：{}\n\
         \t•\t座標：({}, {})\n\
         \n\
         分類：{}\n\
         \n\
         使用者的文字／問題：\n\
         {}\n\
         \n\
         回答時請遵循以下原則：\n\
         \t•\t一律假設使用者是旅客，可能不熟悉當地語言與文化。\n\
         \t•\t使用清楚、簡單的語句。\n\
         \t•\t若有需要，可提及當地習俗或「當地人通常怎麼做」。",
        location.info.country,
        location.info.region,
        city,
        location.lat,
        location.lng,
        category,
        question,
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, LocationInfo};

    fn taipei() -> ResolvedLocation {
        ResolvedLocation::new(
            LocationInfo {
                country: "Taiwan".to_string(),
                region: "Taipei".to_string(),
                city: Some("Xinyi".to_string()),
            },
            Coordinates { lat: 25.03, lng: 121.56 },
        )
    }

    #[test]
    fn test_system_prompt_per_category() {
        assert!(build_system_prompt(Category::Menu).starts_with("你是一位餐廳助手。"));
        assert!(build_system_prompt(Category::Supermarket).starts_with("你是一位超市與商品助手。"));
        assert!(build_system_prompt(Category::Attraction).starts_with("你是一位旅遊景點導覽助手。"));
    }

    #[test]
    fn test_user_prompt_contains_location_and_category() {
        let prompt = build_user_prompt("What is this?", Category::Menu, &taipei());

        assert!(prompt.starts_with("使用者目前所在地："));
        assert!(prompt.contains("\t•\t國家：Taiwan\n"));
        assert!(prompt.contains("\t•\t地區：Taipei\n"));
        assert!(prompt.contains("\t•\t城市：Xinyi\n"));
        assert!(prompt.contains("座標：(25.03, 121.56)"));
        assert!(prompt.contains("分類：menu"));
        assert!(prompt.contains("使用者的文字／問題：\nWhat is this?\n"));
        assert!(prompt.ends_with("「當地人通常怎麼做」。"));
    }

    #[test]
    fn test_missing_city_and_text_use_placeholders() {
        let location = ResolvedLocation::new(LocationInfo::unknown(), Coordinates { lat: 1.0, lng: -2.5 });
        let prompt = build_user_prompt("", Category::Attraction, &location);

        assert!(prompt.contains("城市：Unknown"));
        assert!(prompt.contains("座標：(1, -2.5)"));
        assert!(prompt.contains("(沒有提供文字，主要依靠圖片與定位)"));
    }

    #[test]
    fn test_user_prompt_is_deterministic() {
        let a = build_user_prompt("hello", Category::Supermarket, &taipei());
        let b = build_user_prompt("hello", Category::Supermarket, &taipei());
        assert_eq!(a, b);
    }

    #[test]
    fn test_changing_text_only_changes_text_segment() {
        let a = build_user_prompt("first question", Category::Menu, &taipei());
        let b = build_user_prompt("second question", Category::Menu, &taipei());

        assert_ne!(a, b);
        assert_eq!(a.replace("first question", "second question"), b);
    }
}
