//! OrdersManager - facade over the order engine
//!
//! Every public operation is tenant scoped (by slug) and runs in exactly one
//! transaction: mutations through [`begin_write`], multi-query reads in a
//! read transaction so they see one snapshot.

use super::error::OrderError;
use super::types::{
    CheckoutPolicy, CreateOrderRequest, OrderCreated, OrderItemView, OrderStatusView, OrderTotals,
    SectorView, TableCheckout, TableClosure,
};
use super::{checkout, dispatch, items, lifecycle};
use crate::db::begin_write;
use crate::db::repository::{catalog, dining_table, history, order as order_repo, order_item, tenant};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use shared::models::{DiningTable, PaymentMethod, Tenant};
use shared::order::{ItemStatus, Money, OrderStatus, suggest_order_status};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone, Debug)]
pub struct OrdersManager {
    pool: SqlitePool,
    policy: CheckoutPolicy,
}

impl OrdersManager {
    pub fn new(pool: SqlitePool, policy: CheckoutPolicy) -> Self {
        Self { pool, policy }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn policy(&self) -> CheckoutPolicy {
        self.policy
    }

    // ========== Order submission ==========

    /// Create a PENDING order with its items for the table behind `table_code`
    pub async fn create_order(
        &self,
        tenant_slug: &str,
        req: CreateOrderRequest,
    ) -> Result<OrderCreated, OrderError> {
        lifecycle::validate_create_request(&req)?;

        let mut tx = begin_write(&self.pool).await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let created = lifecycle::create(&mut tx, &tenant, req, now_millis()).await?;
        tx.commit().await?;
        Ok(created)
    }

    // ========== Prep sectors ==========

    /// Work queue of one sector; empty `statuses` means all in-flight ones
    pub async fn get_items_by_sector(
        &self,
        tenant_slug: &str,
        sector_code: &str,
        statuses: &[ItemStatus],
    ) -> Result<SectorView, OrderError> {
        let statuses = dispatch::normalize_statuses(statuses)?;

        let mut tx = self.pool.begin().await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let code = sector_code.trim();
        let sector = catalog::find_sector_by_code(&mut tx, tenant.id, code)
            .await?
            .ok_or_else(|| OrderError::SectorNotFound(code.to_string()))?;
        let rows = order_item::sector_queue(&mut tx, tenant.id, sector.id, &statuses).await?;
        Ok(dispatch::group_into_buckets(rows))
    }

    /// Move all listed items to `target`, or none of them
    pub async fn bulk_update_item_status(
        &self,
        tenant_slug: &str,
        item_ids: &[i64],
        target: ItemStatus,
    ) -> Result<usize, OrderError> {
        if item_ids.is_empty() {
            return Err(OrderError::Validation("itemIds must not be empty".into()));
        }

        let mut tx = begin_write(&self.pool).await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let updated =
            items::bulk_transition(&mut tx, tenant.id, item_ids, target, now_millis()).await?;
        tx.commit().await?;
        Ok(updated)
    }

    // ========== Order lifecycle ==========

    pub async fn transition_order(
        &self,
        tenant_slug: &str,
        order_id: i64,
        target: OrderStatus,
        actor: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), OrderError> {
        validate_optional_text(actor, "actor", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(notes, "notes", MAX_NOTE_LEN)?;

        let mut tx = begin_write(&self.pool).await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let order = order_repo::find_by_id(&mut tx, tenant.id, order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        lifecycle::transition(&mut tx, &order, target, actor, notes, now_millis()).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace the tip of an open order and return its new totals
    pub async fn adjust_tip(
        &self,
        tenant_slug: &str,
        order_id: i64,
        tip_amount: Money,
    ) -> Result<OrderTotals, OrderError> {
        if tip_amount.is_negative() {
            return Err(OrderError::Validation(format!(
                "tipAmount must not be negative, got {tip_amount}"
            )));
        }

        let mut tx = begin_write(&self.pool).await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let order = order_repo::find_by_id(&mut tx, tenant.id, order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        let closed = || OrderError::OrderClosed {
            order_id,
            status: order.status.to_string(),
        };
        if !order.is_open() {
            return Err(closed());
        }

        let totals = OrderTotals::from(&order)
            .with_tip(tip_amount)
            .ok_or_else(|| OrderError::Validation("Order amount is too large".into()))?;
        let updated =
            order_repo::update_tip(&mut tx, order.id, tip_amount, totals.total, now_millis())
                .await?;
        if !updated {
            return Err(closed());
        }
        tx.commit().await?;

        tracing::info!(
            tenant = %tenant_slug,
            order_id,
            tip = %tip_amount,
            total = %totals.total,
            "Order tip adjusted"
        );
        Ok(totals)
    }

    /// Status, money and items of one order as the customer sees it
    pub async fn get_order_status(
        &self,
        tenant_slug: &str,
        table_code: &str,
        order_number: i64,
    ) -> Result<OrderStatusView, OrderError> {
        let mut tx = self.pool.begin().await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let code = table_code.trim();
        let table = dining_table::find_by_access_code(&mut tx, tenant.id, code)
            .await?
            .ok_or_else(|| OrderError::TableNotFound(code.to_string()))?;
        let order = order_repo::find_by_table_and_number(&mut tx, tenant.id, table.id, order_number)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(format!("#{order_number}")))?;
        let items = order_item::find_by_order(&mut tx, order.id).await?;
        let status_history = history::find_by_order(&mut tx, order.id).await?;

        let item_statuses: Vec<ItemStatus> = items.iter().map(|i| i.status).collect();
        Ok(OrderStatusView {
            order_id: order.id,
            order_number: order.order_number,
            table_number: table.number,
            status: order.status,
            suggested_status: suggest_order_status(order.status, &item_statuses),
            totals: OrderTotals::from(&order),
            customer_notes: order.customer_notes.clone(),
            created_at: order.created_at,
            items: items.iter().map(OrderItemView::from).collect(),
            status_history,
        })
    }

    // ========== Checkout ==========

    /// What closing the table would charge, without changing anything
    pub async fn preview_table(
        &self,
        tenant_slug: &str,
        table_id: i64,
    ) -> Result<TableCheckout, OrderError> {
        let mut tx = self.pool.begin().await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let table = resolve_table(&mut tx, &tenant, table_id).await?;
        let (orders, items) = checkout::load_open(&mut tx, tenant.id, &table)
            .await
            .inspect_err(log_no_open_orders)?;
        checkout::preview(&table, &orders, &items)
    }

    /// Pay every open order of the table with `method` and mark them PAID
    pub async fn close_table(
        &self,
        tenant_slug: &str,
        table_id: i64,
        method: PaymentMethod,
        actor: Option<&str>,
    ) -> Result<TableClosure, OrderError> {
        validate_optional_text(actor, "actor", MAX_SHORT_TEXT_LEN)?;

        let mut tx = begin_write(&self.pool).await?;
        let tenant = resolve_tenant(&mut tx, tenant_slug).await?;
        let table = resolve_table(&mut tx, &tenant, table_id).await?;
        let closure = checkout::close(
            &mut tx,
            tenant.id,
            &table,
            method,
            actor,
            self.policy,
            now_millis(),
        )
        .await
        .inspect_err(log_no_open_orders)?;
        tx.commit().await?;
        Ok(closure)
    }
}

async fn resolve_tenant(conn: &mut SqliteConnection, slug: &str) -> Result<Tenant, OrderError> {
    tenant::find_active_by_slug(conn, slug)
        .await?
        .ok_or_else(|| OrderError::TenantNotFound(slug.to_string()))
}

async fn resolve_table(
    conn: &mut SqliteConnection,
    tenant: &Tenant,
    table_id: i64,
) -> Result<DiningTable, OrderError> {
    dining_table::find_by_id(conn, tenant.id, table_id)
        .await?
        .ok_or_else(|| OrderError::TableNotFound(table_id.to_string()))
}

fn log_no_open_orders(err: &OrderError) {
    if let OrderError::NoOpenOrders(table_id) = err {
        tracing::info!(table_id, "Table has no open orders");
    }
}
