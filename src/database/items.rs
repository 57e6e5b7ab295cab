//! The item catalog and per-user inventories. Item identity lives in code as
//! a closed enum; the `inventories` table only stores `(user_id, item_id,
//! quantity)`.

use serenity::model::id::UserId;
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Item {
    RustyNail = 1,
    OldBoot = 2,
    CopperCoin = 3,
    SilverLocket = 4,
    GoldNugget = 5,
    Diamond = 6,
    LuckyCharm = 7,
    Shovel = 8,
}

impl Item {
    pub const ALL: [Item; 8] = [
        Item::RustyNail,
        Item::OldBoot,
        Item::CopperCoin,
        Item::SilverLocket,
        Item::GoldNugget,
        Item::Diamond,
        Item::LuckyCharm,
        Item::Shovel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Item::RustyNail => "rusty nail",
            Item::OldBoot => "old boot",
            Item::CopperCoin => "copper coin",
            Item::SilverLocket => "silver locket",
            Item::GoldNugget => "gold nugget",
            Item::Diamond => "diamond",
            Item::LuckyCharm => "lucky charm",
            Item::Shovel => "shovel",
        }
    }

    pub fn sell_value(self) -> i64 {
        match self {
            Item::RustyNail => 2,
            Item::OldBoot => 5,
            Item::CopperCoin => 15,
            Item::SilverLocket => 60,
            Item::GoldNugget => 250,
            Item::Diamond => 1_000,
            Item::LuckyCharm => 150,
            Item::Shovel => 40,
        }
    }

    /// Shop price for items the shop stocks; dig-only finds return `None`.
    pub fn buy_price(self) -> Option<i64> {
        match self {
            Item::Shovel => Some(120),
            Item::LuckyCharm => Some(600),
            _ => None,
        }
    }

    pub fn from_id(id: i32) -> Option<Item> {
        Item::ALL.iter().copied().find(|item| *item as i32 == id)
    }

    pub fn from_name(name: &str) -> Option<Item> {
        let wanted = name.to_lowercase();
        Item::ALL.iter().copied().find(|item| item.name() == wanted)
    }
}

/// A user's full inventory, skipping zero rows.
pub async fn get_inventory(pool: &PgPool, user_id: UserId) -> Result<Vec<(Item, i64)>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i32, i64)>(
        "SELECT item_id, quantity FROM inventories WHERE user_id = $1 AND quantity > 0 ORDER BY item_id",
    )
    .bind(user_id.get() as i64)
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(id, qty)| Item::from_id(id).map(|item| (item, qty)))
        .collect())
}

pub async fn get_quantity(
    pool: &PgPool,
    user_id: UserId,
    item: Item,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query_as::<_, (i64,)>(
        "SELECT quantity FROM inventories WHERE user_id = $1 AND item_id = $2",
    )
    .bind(user_id.get() as i64)
    .bind(item as i32)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(qty,)| qty).unwrap_or(0))
}

/// Adds (or removes when negative) a quantity of an item atomically. Inserts
/// the row on first acquisition; a negative adjustment that would underflow
/// surfaces as `RowNotFound`.
pub async fn add_to_inventory(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    item: Item,
    delta: i64,
) -> Result<(), sqlx::Error> {
    if delta == 0 {
        return Ok(());
    }
    let id = user_id.get() as i64;
    if delta > 0 {
        sqlx::query(
            "INSERT INTO inventories (user_id, item_id, quantity) VALUES ($1, $2, $3)
             ON CONFLICT (user_id, item_id) DO UPDATE SET quantity = inventories.quantity + EXCLUDED.quantity",
        )
        .bind(id)
        .bind(item as i32)
        .bind(delta)
        .execute(&mut **tx)
        .await?;
        Ok(())
    } else {
        let result = sqlx::query(
            "UPDATE inventories SET quantity = quantity + $3 WHERE user_id = $1 AND item_id = $2 AND quantity + $3 >= 0",
        )
        .bind(id)
        .bind(item as i32)
        .bind(delta)
        .execute(&mut **tx)
        .await?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(sqlx::Error::RowNotFound)
        }
    }
}
