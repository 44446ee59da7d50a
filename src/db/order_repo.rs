// src/db/order_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    domain::draft::NewOrder,
    models::order::{ApplianceItem, Order, OrderAppliance, OrderPart, OrderStatus, PartItem},
};

#[derive(Clone)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  ORDEM (cabeçalho)
    // =========================================================================

    pub async fn insert_order<'e, E>(&self, executor: E, order: &NewOrder) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                user_id, status, received_at, deadline, warranty, discount,
                notes, service_description, invoice_number,
                return_guarantee, fabric_guarantee
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(order.user_id)
        .bind(order.status)
        .bind(order.received_at)
        .bind(order.deadline)
        .bind(&order.warranty)
        .bind(order.discount)
        .bind(&order.notes)
        .bind(&order.service_description)
        .bind(&order.invoice_number)
        .bind(order.return_guarantee)
        .bind(order.fabric_guarantee)
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    pub async fn find_order<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    /// Lista as ordens, opcionalmente filtradas pelo cliente dono.
    pub async fn list_orders<'e, E>(
        &self,
        executor: E,
        user_id: Option<Uuid>,
    ) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;
        Ok(orders)
    }

    pub async fn update_order_scalars<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: OrderStatus,
        service_description: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2, service_description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(service_description)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Ordem de serviço"))?;

        Ok(order)
    }

    // =========================================================================
    //  APARELHOS
    // =========================================================================

    pub async fn insert_appliance<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        item: &ApplianceItem,
    ) -> Result<OrderAppliance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appliance = sqlx::query_as::<_, OrderAppliance>(
            r#"
            INSERT INTO order_appliances (
                order_id, appliance_type, brand, model, voltage,
                serial_number, customer_note, labor_value
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(item.appliance_type)
        .bind(&item.brand)
        .bind(&item.model)
        .bind(item.voltage)
        .bind(&item.serial_number)
        .bind(&item.customer_note)
        .bind(item.labor_value)
        .fetch_one(executor)
        .await?;

        Ok(appliance)
    }

    /// Atualiza um aparelho já persistido; o filtro por order_id impede
    /// que um patch mexa em item de outra ordem.
    pub async fn update_appliance<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        order_id: Uuid,
        item: &ApplianceItem,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE order_appliances SET
                appliance_type = $3,
                brand = $4,
                model = $5,
                voltage = $6,
                serial_number = $7,
                customer_note = $8,
                labor_value = $9
            WHERE id = $1 AND order_id = $2
            "#,
        )
        .bind(id)
        .bind(order_id)
        .bind(item.appliance_type)
        .bind(&item.brand)
        .bind(&item.model)
        .bind(item.voltage)
        .bind(&item.serial_number)
        .bind(&item.customer_note)
        .bind(item.labor_value)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_appliances<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<OrderAppliance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appliances = sqlx::query_as::<_, OrderAppliance>(
            "SELECT * FROM order_appliances WHERE order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(appliances)
    }

    pub async fn delete_appliance<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_appliances WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  PEÇAS
    // =========================================================================

    /// Insere a linha de peça com nome e preço já snapshotados.
    pub async fn insert_part<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        item: &PartItem,
    ) -> Result<OrderPart, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let part = sqlx::query_as::<_, OrderPart>(
            r#"
            INSERT INTO order_parts (order_id, component_id, name, unit_price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(item.component_id)
        .bind(&item.name)
        .bind(item.unit_price)
        .bind(item.quantity)
        .fetch_one(executor)
        .await?;

        Ok(part)
    }

    pub async fn update_part<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        order_id: Uuid,
        item: &PartItem,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE order_parts
            SET quantity = $3
            WHERE id = $1 AND order_id = $2
            "#,
        )
        .bind(id)
        .bind(order_id)
        .bind(item.quantity)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_parts<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<OrderPart>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let parts = sqlx::query_as::<_, OrderPart>(
            "SELECT * FROM order_parts WHERE order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(parts)
    }

    pub async fn delete_part<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_parts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
