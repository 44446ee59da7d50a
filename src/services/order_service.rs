// src/services/order_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ComponentRepository, OrderRepository, UserRepository},
    domain::{
        draft,
        pricing,
        reconciler::ItemRef,
    },
    models::order::{
        ApplianceItem, CreateOrderPayload, Order, OrderDetail, PartItem, UpdateOrderPayload,
    },
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    component_repo: ComponentRepository,
    user_repo: UserRepository,
}

impl OrderService {
    pub fn new(
        repo: OrderRepository,
        component_repo: ComponentRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            repo,
            component_repo,
            user_repo,
        }
    }

    // =========================================================================
    //  CRIAÇÃO (Draft Builder)
    // =========================================================================

    pub async fn create_order(
        &self,
        pool: &PgPool,
        payload: &CreateOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        // Normaliza e valida o rascunho antes de tocar no banco.
        let new_order = draft::build(payload, Utc::now().date_naive())?;

        // Confere se o cliente existe fora da transação.
        self.user_repo
            .find_by_id(pool, new_order.user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let mut tx = pool.begin().await?;

        let order = self.repo.insert_order(&mut *tx, &new_order).await?;

        for appliance in &new_order.appliances {
            let item = ApplianceItem {
                id: None,
                appliance_type: appliance.appliance_type,
                brand: appliance.brand.clone(),
                model: appliance.model.clone(),
                voltage: appliance.voltage,
                serial_number: appliance.serial_number.clone(),
                customer_note: appliance.customer_note.clone(),
                labor_value: appliance.labor_value,
            };
            self.repo.insert_appliance(&mut *tx, order.id, &item).await?;
        }

        // Nome e preço são copiados do catálogo agora; reajustes futuros
        // não mudam ordens já abertas.
        for part in &new_order.parts {
            let component = self
                .component_repo
                .find_by_id(&mut *tx, part.component_id)
                .await?
                .ok_or(AppError::NotFound("Peça"))?;

            let item = PartItem {
                id: None,
                component_id: Some(component.id),
                name: component.name.clone(),
                unit_price: component.unit_price,
                quantity: part.quantity,
                removed: false,
            };
            self.repo.insert_part(&mut *tx, order.id, &item).await?;
        }

        tx.commit().await?;

        tracing::info!("🛠️ OS criada: {} (cliente {})", order.id, order.user_id);

        self.load_detail(pool, order).await
    }

    // =========================================================================
    //  LEITURA (totais sempre re-derivados)
    // =========================================================================

    pub async fn list_orders(
        &self,
        pool: &PgPool,
        user_id: Option<Uuid>,
    ) -> Result<Vec<OrderDetail>, AppError> {
        let orders = self.repo.list_orders(pool, user_id).await?;

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.load_detail(pool, order).await?);
        }
        Ok(details)
    }

    pub async fn get_order(&self, pool: &PgPool, id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .repo
            .find_order(pool, id)
            .await?
            .ok_or(AppError::NotFound("Ordem de serviço"))?;
        self.load_detail(pool, order).await
    }

    async fn load_detail(&self, pool: &PgPool, order: Order) -> Result<OrderDetail, AppError> {
        let user = self
            .user_repo
            .find_by_id(pool, order.user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let appliances = self.repo.list_appliances(pool, order.id).await?;
        let parts = self.repo.list_parts(pool, order.id).await?;

        let appliance_items: Vec<ApplianceItem> = appliances.iter().map(|a| a.to_item()).collect();
        let part_items: Vec<PartItem> = parts.iter().map(|p| p.to_item()).collect();
        let totals = pricing::compute_totals(&appliance_items, &part_items, order.discount);

        Ok(OrderDetail {
            header: order,
            user,
            appliances,
            parts,
            parts_total: totals.parts_total,
            labor_total: totals.labor_total,
            total_value: totals.total_value,
        })
    }

    // =========================================================================
    //  EDIÇÃO (lado servidor do reconciliador)
    // =========================================================================

    /// Aplica o patch produzido pela sessão de edição: escalares + itens
    /// sobreviventes. Os deletes já chegaram antes pelo endpoint de
    /// item; aqui cada item é tratado de forma exaustiva como novo ou
    /// persistido, dentro de uma única transação.
    pub async fn update_order(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &UpdateOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        let mut tx = pool.begin().await?;

        let order = self
            .repo
            .update_order_scalars(
                &mut *tx,
                id,
                payload.status,
                payload.service_description.as_deref(),
            )
            .await?;

        for item in &payload.appliances {
            match ItemRef::from(item.id) {
                ItemRef::Persisted(item_id) => {
                    let touched = self
                        .repo
                        .update_appliance(&mut *tx, item_id, id, item)
                        .await?;
                    if touched == 0 {
                        return Err(AppError::NotFound("Aparelho"));
                    }
                }
                ItemRef::New => {
                    self.repo.insert_appliance(&mut *tx, id, item).await?;
                }
            }
        }

        for item in &payload.parts {
            // Linha zerada que escapou do filtro do cliente: ignorada.
            if item.quantity <= 0 {
                continue;
            }
            match ItemRef::from(item.id) {
                ItemRef::Persisted(item_id) => {
                    let touched = self.repo.update_part(&mut *tx, item_id, id, item).await?;
                    if touched == 0 {
                        return Err(AppError::NotFound("Peça da ordem"));
                    }
                }
                ItemRef::New => {
                    self.repo.insert_part(&mut *tx, id, item).await?;
                }
            }
        }

        tx.commit().await?;

        self.load_detail(pool, order).await
    }

    /// DELETE /order-items/{id}: o id pode ser de aparelho ou de peça.
    /// Idempotente: deletar um id já removido responde sucesso, para o
    /// retry de um save parcialmente falho não travar.
    pub async fn delete_order_item(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete_appliance(pool, id).await?;
        if deleted > 0 {
            return Ok(());
        }

        let deleted = self.repo.delete_part(pool, id).await?;
        if deleted == 0 {
            tracing::debug!("DELETE /order-items/{} sem efeito (já removido?)", id);
        }
        Ok(())
    }
}
