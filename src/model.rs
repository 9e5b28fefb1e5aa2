//! Menu data for the carousel demo.
//! Fixtures are loose JSON; everything is normalized before it reaches a component.

use serde::Deserialize;
use serde_json::Value;

use crate::util::cwarn;

const FALLBACK_CURRENCY: &str = "₽";
const BUNDLED_MENU: &str = include_str!("../assets/menu.json");

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DishFixture {
    pub id: Value,
    pub name: Value,
    pub description: Value,
    pub price: Value,
    pub currency: Value,
    pub image: Value,
    pub popular: Value,
    pub tags: Value,
    pub order_url: Value,
    pub allergens: Value,
    pub spicy_level: Value,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryFixture {
    pub id: Value,
    pub name: Value,
    pub description: Value,
    pub dishes: Value,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuFixture {
    pub id: Value,
    pub name: Value,
    pub description: Value,
    pub location: Value,
    pub cuisines: Value,
    pub banner_images: Value,
    pub categories: Value,
    pub contact: Value,
    pub hours: Value,
    pub currency: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub messenger: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuDish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub popular: bool,
    pub tags: Vec<String>,
    pub order_url: Option<String>,
    pub allergens: Vec<String>,
    pub spicy_level: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dishes: Vec<MenuDish>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub cuisines: Vec<String>,
    pub banner_images: Vec<String>,
    pub categories: Vec<MenuCategory>,
    pub contact: MenuContactInfo,
    pub hours: Option<String>,
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub dish_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HighlightedDish {
    pub dish: MenuDish,
    pub category_id: String,
    pub category_name: String,
}

fn text(v: &Value) -> String {
    v.as_str().map(|s| s.trim().to_string()).unwrap_or_default()
}

fn non_empty(v: &Value) -> Option<String> {
    Some(text(v)).filter(|s| !s.is_empty())
}

fn finite(v: &Value) -> Option<f64> {
    v.as_f64().filter(|n| n.is_finite())
}

fn string_list(v: &Value) -> Vec<String> {
    v.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Entries that are objects with a string `id`, deserialized; everything else is dropped.
fn with_string_id<T: for<'de> Deserialize<'de>>(v: &Value) -> Vec<(String, T)> {
    v.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let id = item.get("id")?.as_str()?.to_string();
                    let parsed = serde_json::from_value::<T>(item.clone()).ok()?;
                    Some((id, parsed))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_dish(id: String, dish: &DishFixture, menu_currency: &str) -> MenuDish {
    MenuDish {
        id,
        name: text(&dish.name),
        description: text(&dish.description),
        price: finite(&dish.price),
        currency: non_empty(&dish.currency).or_else(|| Some(menu_currency.to_string())),
        image: non_empty(&dish.image),
        popular: truthy(&dish.popular),
        tags: string_list(&dish.tags),
        order_url: non_empty(&dish.order_url),
        allergens: string_list(&dish.allergens),
        spicy_level: finite(&dish.spicy_level),
    }
}

fn normalize_category(id: String, category: &CategoryFixture, menu_currency: &str) -> MenuCategory {
    let dishes = with_string_id::<DishFixture>(&category.dishes)
        .into_iter()
        .map(|(dish_id, dish)| normalize_dish(dish_id, &dish, menu_currency))
        .collect();
    MenuCategory {
        id,
        name: non_empty(&category.name).unwrap_or_else(|| "Category".to_string()),
        description: text(&category.description),
        dishes,
    }
}

pub fn normalize_menu(fallback_id: &str, fixture: &MenuFixture) -> MenuDefinition {
    let currency = non_empty(&fixture.currency).unwrap_or_else(|| FALLBACK_CURRENCY.to_string());
    let categories = with_string_id::<CategoryFixture>(&fixture.categories)
        .into_iter()
        .map(|(id, category)| normalize_category(id, &category, &currency))
        .collect();
    MenuDefinition {
        id: non_empty(&fixture.id).unwrap_or_else(|| fallback_id.to_string()),
        name: non_empty(&fixture.name).unwrap_or_else(|| "Menu".to_string()),
        description: text(&fixture.description),
        location: non_empty(&fixture.location),
        cuisines: string_list(&fixture.cuisines),
        banner_images: string_list(&fixture.banner_images),
        categories,
        contact: serde_json::from_value(fixture.contact.clone()).unwrap_or_default(),
        hours: non_empty(&fixture.hours),
        currency,
    }
}

pub fn parse_menu(fallback_id: &str, raw: &str) -> Option<MenuDefinition> {
    match serde_json::from_str::<MenuFixture>(raw) {
        Ok(fixture) => {
            let menu = normalize_menu(fallback_id, &fixture);
            for warning in collect_menu_warnings(&menu) {
                cwarn(&format!("[menu] {}", warning));
            }
            Some(menu)
        }
        Err(err) => {
            cwarn(&format!("[menu] Failed to parse {}: {}", fallback_id, err));
            None
        }
    }
}

pub fn bundled_menu() -> Option<MenuDefinition> {
    parse_menu("bundled", BUNDLED_MENU)
}

pub fn resolve_category_options(menu: Option<&MenuDefinition>) -> Vec<CategoryOption> {
    let Some(menu) = menu else {
        return Vec::new();
    };
    menu.categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id.clone(),
            name: c.name.clone(),
            dish_count: c.dishes.iter().filter(|d| !d.name.is_empty()).count(),
        })
        .collect()
}

pub fn resolve_popular_dishes(menu: Option<&MenuDefinition>) -> Vec<HighlightedDish> {
    let Some(menu) = menu else {
        return Vec::new();
    };
    menu.categories
        .iter()
        .flat_map(|c| {
            c.dishes
                .iter()
                .filter(|d| d.popular && !d.name.is_empty())
                .map(move |d| HighlightedDish {
                    dish: d.clone(),
                    category_id: c.id.clone(),
                    category_name: c.name.clone(),
                })
        })
        .collect()
}

/// Dishes without a display name are hidden from every listing.
pub fn collect_menu_warnings(menu: &MenuDefinition) -> Vec<String> {
    menu.categories
        .iter()
        .flat_map(|c| {
            c.dishes.iter().filter(|d| d.name.trim().is_empty()).map(move |d| {
                format!(
                    "Dish with id \"{}\" in category \"{}\" is missing a display name and will be hidden.",
                    d.id, c.id
                )
            })
        })
        .collect()
}

/// Search text plus the set of selected category ids (empty means all).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuFilters {
    pub query: String,
    pub categories: Vec<String>,
}

impl MenuFilters {
    pub fn is_filtering(&self) -> bool {
        !self.query.trim().is_empty() || !self.categories.is_empty()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn toggle_category(&mut self, id: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == id) {
            self.categories.remove(pos);
        } else {
            self.categories.push(id.to_string());
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn dish_matches(query: &str, dish: &MenuDish) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", dish.name, dish.description, dish.tags.join(" ")).to_lowercase();
    haystack.contains(query)
}

/// Categories with their named dishes that pass `filters`; empty categories are dropped
/// once any filter is active.
pub fn filter_categories(menu: Option<&MenuDefinition>, filters: &MenuFilters) -> Vec<MenuCategory> {
    let Some(menu) = menu else {
        return Vec::new();
    };
    let query = filters.query.trim().to_lowercase();
    let by_category = !filters.categories.is_empty();
    menu.categories
        .iter()
        .filter_map(|c| {
            let named = c.dishes.iter().filter(|d| !d.name.trim().is_empty());
            if query.is_empty() && !by_category {
                return Some(MenuCategory {
                    dishes: named.cloned().collect(),
                    ..c.clone()
                });
            }
            if by_category && !filters.categories.contains(&c.id) {
                return None;
            }
            let dishes: Vec<MenuDish> = named.filter(|d| dish_matches(&query, d)).cloned().collect();
            if dishes.is_empty() {
                return None;
            }
            Some(MenuCategory { dishes, ..c.clone() })
        })
        .collect()
}

pub fn filtered_dish_count(categories: &[MenuCategory]) -> usize {
    categories.iter().map(|c| c.dishes.len()).sum()
}
