//! 查询结果投影
//!
//! 把带 NULL 列的平铺查询行转换成响应结构。

use std::collections::HashMap;

use super::products::model::{ProductDetail, ProductOwner, ProductWithUserRow};
use super::users::model::{ProductEntry, UserProductRow, UserWithProducts};

/// 按用户 ID 聚合 LEFT JOIN 结果
///
/// 输出顺序为用户首次出现的顺序；每个用户只出现一次，
/// 只有 product_id 非 NULL 的行才会追加产品。
pub fn group_users_with_products<I>(rows: I) -> Vec<UserWithProducts>
where
    I: IntoIterator<Item = UserProductRow>,
{
    let mut index: HashMap<i32, usize> = HashMap::new();

    rows.into_iter().fold(Vec::new(), |mut users, row| {
        let slot = *index.entry(row.user_id).or_insert_with(|| {
            users.push(UserWithProducts {
                id: row.user_id,
                name: row.user_name.clone(),
                phone: row.user_phone.clone(),
                email: row.user_email.clone(),
                created_at: row.user_created_at,
                products: Vec::new(),
            });
            users.len() - 1
        });

        if let Some(entry) = product_entry(row) {
            users[slot].products.push(entry);
        }
        users
    })
}

fn product_entry(row: UserProductRow) -> Option<ProductEntry> {
    let id = row.product_id?;
    Some(ProductEntry {
        id,
        name: row.product_name,
        description: row.product_description,
        price: row.product_price,
        created_at: row.product_created_at,
        updated_at: row.product_updated_at,
    })
}

impl From<ProductWithUserRow> for ProductDetail {
    fn from(row: ProductWithUserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: ProductOwner {
                user_name: row.user_name,
                user_email: row.user_email,
                user_phone: row.user_phone,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn user_only(user_id: i32, name: &str) -> UserProductRow {
        UserProductRow {
            user_id,
            user_name: name.to_string(),
            user_phone: None,
            user_email: format!("{}@example.com", name),
            user_created_at: None,
            product_id: None,
            product_name: None,
            product_description: None,
            product_price: None,
            product_created_at: None,
            product_updated_at: None,
        }
    }

    fn with_product(user_id: i32, name: &str, product_id: i32) -> UserProductRow {
        UserProductRow {
            product_id: Some(product_id),
            product_name: Some(format!("product-{}", product_id)),
            product_price: Some(Decimal::new(product_id as i64 * 100, 2)),
            ..user_only(user_id, name)
        }
    }

    #[test]
    fn test_empty_rows() {
        assert!(group_users_with_products(Vec::new()).is_empty());
    }

    #[test]
    fn test_user_without_products() {
        let users = group_users_with_products(vec![user_only(1, "alice")]);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 1);
        assert!(users[0].products.is_empty());
    }

    #[test]
    fn test_groups_by_user_in_first_seen_order() {
        let rows = vec![
            with_product(3, "carol", 10),
            with_product(1, "alice", 11),
            user_only(2, "bob"),
            with_product(3, "carol", 12),
            with_product(1, "alice", 13),
        ];

        let users = group_users_with_products(rows);

        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let products = |i: usize| users[i].products.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(products(0), vec![10, 12]);
        assert_eq!(products(1), vec![11, 13]);
        assert!(products(2).is_empty());
    }

    #[test]
    fn test_product_count_matches_non_null_rows() {
        let rows: Vec<UserProductRow> = (0..20)
            .map(|i| {
                if i % 3 == 0 {
                    user_only(i % 4, "u")
                } else {
                    with_product(i % 4, "u", 100 + i)
                }
            })
            .collect();
        let non_null = rows.iter().filter(|r| r.product_id.is_some()).count();

        let users = group_users_with_products(rows);

        assert_eq!(users.len(), 4);
        let total: usize = users.iter().map(|u| u.products.len()).sum();
        assert_eq!(total, non_null);
    }

    #[test]
    fn test_product_detail_nests_owner() {
        let row = ProductWithUserRow {
            id: 5,
            name: "Lamp".to_string(),
            description: Some("desk lamp".to_string()),
            price: Decimal::new(2500, 2),
            user_id: 9,
            created_at: None,
            updated_at: None,
            user_name: "alice".to_string(),
            user_email: "alice@example.com".to_string(),
            user_phone: None,
        };

        let detail = ProductDetail::from(row);
        assert_eq!(detail.user.user_name, "alice");
        assert_eq!(detail.user.user_phone, None);

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["User"]["UserEmail"], "alice@example.com");
        assert!(value["User"].get("UserPhone").is_none());
    }
}
