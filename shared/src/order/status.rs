//! Order and item lifecycles
//!
//! Both machines only move one step forward at a time, or to `Cancelled`
//! from any non-terminal state. Nothing leaves a terminal state and a state
//! never transitions to itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status (订单状态)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Ready,
    Delivered,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::InProgress,
        Self::Ready,
        Self::Delivered,
        Self::Paid,
        Self::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Paid => "PAID",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Immediate forward successor, `None` for `Paid` and `Cancelled`.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::InProgress),
            Self::InProgress => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered => Some(Self::Paid),
            Self::Paid | Self::Cancelled => None,
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == Self::Cancelled || self.next() == Some(target)
    }

    /// Forward steps from `self` to `target`, excluding `self`.
    ///
    /// Returns `None` when `target` is not reachable by forward steps
    /// (backwards, terminal start, or `Cancelled`).
    pub fn path_to(&self, target: OrderStatus) -> Option<Vec<OrderStatus>> {
        let mut path = Vec::new();
        let mut current = *self;
        while current != target {
            current = current.next()?;
            path.push(current);
        }
        if path.is_empty() { None } else { Some(path) }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// Line item status (菜品制作状态)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ItemStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Served,
    Cancelled,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Ready,
        Self::Served,
        Self::Cancelled,
    ];

    /// Statuses a prep console works on
    pub const IN_FLIGHT: [ItemStatus; 3] = [Self::Pending, Self::InProgress, Self::Ready];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Served => "SERVED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Served | Self::Cancelled)
    }

    pub const fn next(&self) -> Option<ItemStatus> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Ready),
            Self::Ready => Some(Self::Served),
            Self::Served | Self::Cancelled => None,
        }
    }

    pub fn can_transition_to(&self, target: ItemStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == Self::Cancelled || self.next() == Some(target)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown item status: {s}"))
    }
}

/// Status the order could legally move to next, judging by its items.
///
/// Cancelled items are ignored. Returns `None` when the items do not call for
/// a change or the implied status is not the order's immediate successor.
pub fn suggest_order_status(current: OrderStatus, items: &[ItemStatus]) -> Option<OrderStatus> {
    let live: Vec<ItemStatus> = items
        .iter()
        .copied()
        .filter(|s| *s != ItemStatus::Cancelled)
        .collect();
    if live.is_empty() {
        return None;
    }

    let implied = if live.iter().all(|s| *s == ItemStatus::Served) {
        OrderStatus::Delivered
    } else if live
        .iter()
        .all(|s| matches!(s, ItemStatus::Ready | ItemStatus::Served))
    {
        OrderStatus::Ready
    } else if live.iter().any(|s| *s != ItemStatus::Pending) {
        OrderStatus::InProgress
    } else {
        return None;
    };

    (current.next() == Some(implied)).then_some(implied)
}
