//! Menu Models (categories and dishes)

use crate::order::Money;
use crate::util::split_list;
use serde::{Deserialize, Serialize};

/// Menu category; routes its dishes to a prep sector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    /// `None` is a menu integrity gap: dishes in this category cannot be ordered
    pub prep_sector_id: Option<i64>,
}

/// Dish entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub tenant_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub price: Money,
    /// Comma separated allergen list
    pub allergens: Option<String>,
    pub is_available: bool,
    pub is_in_stock: bool,
}

impl Dish {
    pub fn can_be_ordered(&self) -> bool {
        self.is_available && self.is_in_stock
    }

    pub fn allergen_list(&self) -> Vec<String> {
        split_list(self.allergens.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(is_available: bool, is_in_stock: bool) -> Dish {
        Dish {
            id: 1,
            tenant_id: 1,
            category_id: Some(1),
            name: "Paella".into(),
            price: Money::from_minor(1450),
            allergens: Some("shellfish, gluten".into()),
            is_available,
            is_in_stock,
        }
    }

    #[test]
    fn test_can_be_ordered() {
        assert!(dish(true, true).can_be_ordered());
        assert!(!dish(false, true).can_be_ordered());
        assert!(!dish(true, false).can_be_ordered());
    }

    #[test]
    fn test_allergen_list() {
        assert_eq!(dish(true, true).allergen_list(), vec!["shellfish", "gluten"]);
    }
}
