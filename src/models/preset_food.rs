use serde::{Deserialize, Serialize};

use super::NewFoodItem;
use crate::config::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
  Grains,
  Protein,
  Vegetables,
  Fruits,
  Dairy,
  Snacks,
  Beverages,
}

impl FoodCategory {
  pub const ALL: [FoodCategory; 7] = [
    FoodCategory::Grains,
    FoodCategory::Protein,
    FoodCategory::Vegetables,
    FoodCategory::Fruits,
    FoodCategory::Dairy,
    FoodCategory::Snacks,
    FoodCategory::Beverages,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Grains => "grains",
      Self::Protein => "protein",
      Self::Vegetables => "vegetables",
      Self::Fruits => "fruits",
      Self::Dairy => "dairy",
      Self::Snacks => "snacks",
      Self::Beverages => "beverages",
    }
  }

  pub fn chinese_name(&self) -> &'static str {
    match self {
      Self::Grains => "主食",
      Self::Protein => "蛋白质",
      Self::Vegetables => "蔬菜",
      Self::Fruits => "水果",
      Self::Dairy => "乳制品",
      Self::Snacks => "零食",
      Self::Beverages => "饮料",
    }
  }
}

impl std::fmt::Display for FoodCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for FoodCategory {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    FoodCategory::ALL
      .into_iter()
      .find(|c| c.as_str() == s)
      .ok_or_else(|| format!("Unknown food category: {}", s))
  }
}

/// A built-in food for quick meal entry. Nutrients are per serving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetFood {
  pub name_english: &'static str,
  pub name_chinese: &'static str,
  pub category: FoodCategory,
  pub calories: f64,
  pub serving_size: &'static str,
  pub protein_g: f64,
  pub carbs_g: f64,
  pub fat_g: f64,
}

impl PresetFood {
  pub fn display_name(&self, language: Language) -> &'static str {
    match language {
      Language::English => self.name_english,
      Language::Chinese => self.name_chinese,
    }
  }

  /// One serving as a food item ready to add to a meal
  pub fn to_food_item(&self, language: Language) -> NewFoodItem {
    NewFoodItem {
      name: self.display_name(language).to_string(),
      calories: self.calories,
      serving_size: Some(self.serving_size.to_string()),
      protein_g: Some(self.protein_g),
      carbs_g: Some(self.carbs_g),
      fat_g: Some(self.fat_g),
    }
  }

  /// Case-insensitive substring match on either name
  pub fn matches(&self, query: &str) -> bool {
    let query = query.trim();
    query.is_empty()
      || self.name_english.to_lowercase().contains(&query.to_lowercase())
      || self.name_chinese.contains(query)
  }
}

#[allow(clippy::too_many_arguments)]
const fn food(
  name_english: &'static str,
  name_chinese: &'static str,
  category: FoodCategory,
  calories: f64,
  serving_size: &'static str,
  protein_g: f64,
  carbs_g: f64,
  fat_g: f64,
) -> PresetFood {
  PresetFood {
    name_english,
    name_chinese,
    category,
    calories,
    serving_size,
    protein_g,
    carbs_g,
    fat_g,
  }
}

/// Built-in quick-pick foods, in display order
pub const PRESET_FOODS: &[PresetFood] = &[
  food("White Rice", "白米饭", FoodCategory::Grains, 130.0, "100g", 2.7, 28.0, 0.3),
  food("Brown Rice", "糙米饭", FoodCategory::Grains, 111.0, "100g", 2.6, 23.0, 0.9),
  food("Noodles", "面条", FoodCategory::Grains, 137.0, "100g", 4.5, 25.0, 0.5),
  food("Bread", "面包", FoodCategory::Grains, 265.0, "100g", 9.0, 49.0, 3.2),
  food("Sweet Potato", "红薯", FoodCategory::Grains, 86.0, "100g", 1.6, 20.0, 0.1),
  food("Oatmeal", "燕麦", FoodCategory::Grains, 68.0, "100g", 2.4, 12.0, 1.4),
  food("Chicken Breast", "鸡胸肉", FoodCategory::Protein, 165.0, "100g", 31.0, 0.0, 3.6),
  food("Egg", "鸡蛋", FoodCategory::Protein, 155.0, "1个(50g)", 13.0, 1.1, 11.0),
  food("Tofu", "豆腐", FoodCategory::Protein, 76.0, "100g", 8.0, 1.9, 4.8),
  food("Salmon", "三文鱼", FoodCategory::Protein, 208.0, "100g", 20.0, 0.0, 13.0),
  food("Beef", "牛肉", FoodCategory::Protein, 250.0, "100g", 26.0, 0.0, 15.0),
  food("Pork", "猪肉", FoodCategory::Protein, 242.0, "100g", 27.0, 0.0, 14.0),
  food("Broccoli", "西兰花", FoodCategory::Vegetables, 34.0, "100g", 2.8, 7.0, 0.4),
  food("Spinach", "菠菜", FoodCategory::Vegetables, 23.0, "100g", 2.9, 3.6, 0.4),
  food("Tomato", "番茄", FoodCategory::Vegetables, 18.0, "100g", 0.9, 3.9, 0.2),
  food("Cucumber", "黄瓜", FoodCategory::Vegetables, 15.0, "100g", 0.7, 3.6, 0.1),
  food("Carrot", "胡萝卜", FoodCategory::Vegetables, 41.0, "100g", 0.9, 10.0, 0.2),
  food("Apple", "苹果", FoodCategory::Fruits, 52.0, "100g", 0.3, 14.0, 0.2),
  food("Banana", "香蕉", FoodCategory::Fruits, 89.0, "100g", 1.1, 23.0, 0.3),
  food("Orange", "橙子", FoodCategory::Fruits, 47.0, "100g", 0.9, 12.0, 0.1),
  food("Strawberry", "草莓", FoodCategory::Fruits, 32.0, "100g", 0.7, 8.0, 0.3),
  food("Milk", "牛奶", FoodCategory::Dairy, 61.0, "100ml", 3.2, 4.8, 3.3),
  food("Yogurt", "酸奶", FoodCategory::Dairy, 59.0, "100g", 3.5, 4.7, 3.3),
  food("Cheese", "奶酪", FoodCategory::Dairy, 402.0, "100g", 25.0, 1.3, 33.0),
  food("Potato Chips", "薯片", FoodCategory::Snacks, 536.0, "100g", 7.0, 53.0, 35.0),
  food("Chocolate", "巧克力", FoodCategory::Snacks, 546.0, "100g", 5.0, 59.0, 31.0),
  food("Cookie", "饼干", FoodCategory::Snacks, 502.0, "100g", 6.0, 65.0, 24.0),
  food("Coca Cola", "可乐", FoodCategory::Beverages, 42.0, "100ml", 0.0, 10.6, 0.0),
  food("Orange Juice", "橙汁", FoodCategory::Beverages, 45.0, "100ml", 0.7, 10.4, 0.2),
  food("Coffee", "咖啡(无糖)", FoodCategory::Beverages, 2.0, "100ml", 0.3, 0.0, 0.0),
];

/// Catalog entries in `category` (any when None) whose name contains `query`
pub fn find_preset_foods(category: Option<FoodCategory>, query: &str) -> Vec<PresetFood> {
  PRESET_FOODS
    .iter()
    .filter(|f| category.map_or(true, |c| f.category == c))
    .filter(|f| f.matches(query))
    .copied()
    .collect()
}

/// Exact English or Chinese name lookup
pub fn preset_food_named(name: &str) -> Option<PresetFood> {
  let name = name.trim();
  PRESET_FOODS
    .iter()
    .find(|f| f.name_english.eq_ignore_ascii_case(name) || f.name_chinese == name)
    .copied()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_category_filter() {
    let fruits = find_preset_foods(Some(FoodCategory::Fruits), "");
    assert_eq!(fruits.len(), 4);
    assert!(fruits.iter().all(|f| f.category == FoodCategory::Fruits));

    assert_eq!(find_preset_foods(None, "").len(), PRESET_FOODS.len());
    for category in FoodCategory::ALL {
      assert!(!find_preset_foods(Some(category), "").is_empty());
    }
  }

  #[test]
  fn test_name_search() {
    let rice: Vec<&str> = find_preset_foods(None, "RICE").iter().map(|f| f.name_english).collect();
    assert_eq!(rice, vec!["White Rice", "Brown Rice"]);

    let orange = find_preset_foods(None, "橙");
    assert_eq!(orange.len(), 2);

    // Both filters apply together
    let drinks = find_preset_foods(Some(FoodCategory::Beverages), "orange");
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].name_english, "Orange Juice");

    assert!(find_preset_foods(None, "pizza").is_empty());
  }

  #[test]
  fn test_named_lookup_and_food_item() {
    let egg = preset_food_named("egg").expect("egg in catalog");
    assert_eq!(preset_food_named("鸡蛋"), Some(egg));
    assert!(preset_food_named("Dragonfruit").is_none());

    let item = egg.to_food_item(Language::Chinese);
    assert_eq!(item.name, "鸡蛋");
    assert_eq!(item.calories, 155.0);
    assert_eq!(item.serving_size.as_deref(), Some("1个(50g)"));
    assert_eq!(item.protein_g, Some(13.0));
    assert_eq!(item.fat_g, Some(11.0));

    assert_eq!(egg.to_food_item(Language::English).name, "Egg");
  }

  #[test]
  fn test_category_parse() {
    for category in FoodCategory::ALL {
      assert_eq!(category.to_string().parse::<FoodCategory>().unwrap(), category);
    }
    assert!("candy".parse::<FoodCategory>().is_err());
    assert_eq!(FoodCategory::Dairy.chinese_name(), "乳制品");
  }
}
