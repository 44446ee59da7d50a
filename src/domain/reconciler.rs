// src/domain/reconciler.rs
//
// Reconciliador de edição de OS. A sessão trabalha sobre uma cópia
// profunda do registro persistido; nada toca o original até o save.
// Três peças de estado: a cópia de trabalho, o conjunto de ids
// removidos na sessão e o marcador de remoção das peças (quantidade
// zerada + flag, linha mantida no vetor para preservar os índices e o
// desfazer dentro da sessão).

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::pricing::{self, Totals};
use crate::models::component::Component;
use crate::models::order::{
    ApplianceItem, Order, OrderAppliance, OrderPart, OrderStatus, PartItem, UpdateOrderPayload,
};

/// Distinção explícita entre item novo e persistido, no lugar do
/// id anulável espalhado em checagens de null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef {
    New,
    Persisted(Uuid),
}

impl From<Option<Uuid>> for ItemRef {
    fn from(id: Option<Uuid>) -> Self {
        match id {
            Some(id) => ItemRef::Persisted(id),
            None => ItemRef::New,
        }
    }
}

impl ItemRef {
    pub fn persisted_id(&self) -> Option<Uuid> {
        match self {
            ItemRef::Persisted(id) => Some(*id),
            ItemRef::New => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Esta peça já foi adicionada à ordem.")]
    DuplicatePart,

    #[error("Linha inexistente na sessão de edição.")]
    IndexOutOfBounds,
}

/// Retrato imutável da ordem como veio do servidor.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    pub status: OrderStatus,
    pub service_description: Option<String>,
    pub discount: Decimal,
    pub appliances: Vec<ApplianceItem>,
    pub parts: Vec<PartItem>,
}

impl OrderSnapshot {
    pub fn of(order: &Order, appliances: &[OrderAppliance], parts: &[OrderPart]) -> Self {
        Self {
            status: order.status,
            service_description: order.service_description.clone(),
            discount: order.discount,
            appliances: appliances.iter().map(OrderAppliance::to_item).collect(),
            parts: parts.iter().map(OrderPart::to_item).collect(),
        }
    }
}

/// O que o save precisa executar: primeiro todos os deletes, depois um
/// único patch com os itens sobreviventes.
#[derive(Debug, Clone)]
pub struct SavePlan {
    pub delete_ids: Vec<Uuid>,
    pub patch: UpdateOrderPayload,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    original: OrderSnapshot,
    status: OrderStatus,
    service_description: Option<String>,
    appliances: Vec<ApplianceItem>,
    parts: Vec<PartItem>,
    removed_ids: BTreeSet<Uuid>,
}

impl EditSession {
    pub fn open(snapshot: OrderSnapshot) -> Self {
        Self {
            status: snapshot.status,
            service_description: snapshot.service_description.clone(),
            appliances: snapshot.appliances.clone(),
            parts: snapshot.parts.clone(),
            removed_ids: BTreeSet::new(),
            original: snapshot,
        }
    }

    // --- leitura ---

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn appliances(&self) -> &[ApplianceItem] {
        &self.appliances
    }

    /// Vetor de trabalho completo, inclusive linhas marcadas como removidas.
    pub fn parts(&self) -> &[PartItem] {
        &self.parts
    }

    /// O que a tela renderiza: o vetor de trabalho filtrado por "não removida".
    pub fn active_parts(&self) -> Vec<&PartItem> {
        self.parts.iter().filter(|p| !p.removed).collect()
    }

    pub fn removed_ids(&self) -> &BTreeSet<Uuid> {
        &self.removed_ids
    }

    pub fn totals(&self) -> Totals {
        pricing::compute_totals(&self.appliances, &self.parts, self.original.discount)
    }

    // --- edição de escalares ---

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn set_service_description(&mut self, text: Option<String>) {
        self.service_description = text;
    }

    // --- aparelhos ---

    /// Acrescenta um aparelho novo à cópia de trabalho. O id é sempre
    /// zerado: item sem id nunca vai para o endpoint de delete.
    pub fn add_appliance(&mut self, mut item: ApplianceItem) {
        item.id = None;
        self.appliances.push(item);
    }

    /// Tira o aparelho do vetor de trabalho. Se já era persistido, o id
    /// entra no conjunto de remoções pendentes; se nunca foi salvo, a
    /// linha simplesmente some, sem efeito de rede.
    pub fn remove_appliance(&mut self, index: usize) -> Result<(), ReconcileError> {
        if index >= self.appliances.len() {
            return Err(ReconcileError::IndexOutOfBounds);
        }
        let removed = self.appliances.remove(index);
        if let ItemRef::Persisted(id) = ItemRef::from(removed.id) {
            self.removed_ids.insert(id);
        }
        Ok(())
    }

    // --- peças ---

    /// Adiciona uma peça do catálogo, copiando nome e preço por valor
    /// (mudanças futuras no catálogo não alteram ordens antigas).
    /// Rejeita componente já presente entre as peças ativas.
    pub fn add_part(&mut self, component: &Component, quantity: i32) -> Result<(), ReconcileError> {
        let duplicate = self
            .parts
            .iter()
            .any(|p| !p.removed && p.component_id == Some(component.id));
        if duplicate {
            return Err(ReconcileError::DuplicatePart);
        }

        self.parts.push(PartItem {
            id: None,
            component_id: Some(component.id),
            name: component.name.clone(),
            unit_price: component.unit_price,
            quantity,
            removed: false,
        });
        Ok(())
    }

    /// Remoção lógica: zera a quantidade e liga a flag, sem encolher o
    /// vetor, para a linha continuar endereçável até o save.
    pub fn mark_part_removed(&mut self, index: usize) -> Result<(), ReconcileError> {
        let part = self
            .parts
            .get_mut(index)
            .ok_or(ReconcileError::IndexOutOfBounds)?;
        part.quantity = 0;
        part.removed = true;
        Ok(())
    }

    /// Quantidade reduzida a zero equivale à remoção lógica.
    pub fn set_part_quantity(&mut self, index: usize, quantity: i32) -> Result<(), ReconcileError> {
        if quantity <= 0 {
            return self.mark_part_removed(index);
        }
        let part = self
            .parts
            .get_mut(index)
            .ok_or(ReconcileError::IndexOutOfBounds)?;
        part.quantity = quantity;
        part.removed = false;
        Ok(())
    }

    // --- ciclo de vida da sessão ---

    /// Plano de salvamento: ids a deletar + patch normalizado com os
    /// itens sobreviventes. Peças removidas logicamente entram na lista
    /// de deleção quando persistidas e são filtradas do patch.
    pub fn save_plan(&self) -> SavePlan {
        let mut delete_ids: Vec<Uuid> = self.removed_ids.iter().copied().collect();
        for part in &self.parts {
            if part.removed {
                if let Some(id) = part.id {
                    if !self.removed_ids.contains(&id) {
                        delete_ids.push(id);
                    }
                }
            }
        }

        let surviving_parts: Vec<PartItem> = self
            .parts
            .iter()
            .filter(|p| !p.removed)
            .cloned()
            .collect();

        SavePlan {
            delete_ids,
            patch: UpdateOrderPayload {
                status: self.status,
                service_description: self.service_description.clone(),
                appliances: self.appliances.clone(),
                parts: surviving_parts,
            },
        }
    }

    /// Chamado após o save completo: limpa as remoções pendentes e a
    /// sessão passa a refletir o estado recém-gravado.
    pub fn commit(&mut self) {
        self.removed_ids.clear();
        self.parts.retain(|p| !p.removed);
        self.original = OrderSnapshot {
            status: self.status,
            service_description: self.service_description.clone(),
            discount: self.original.discount,
            appliances: self.appliances.clone(),
            parts: self.parts.clone(),
        };
    }

    /// Descarta tudo: re-clona do original e limpa as remoções
    /// pendentes, sem nenhuma chamada de rede.
    pub fn cancel(&mut self) {
        self.status = self.original.status;
        self.service_description = self.original.service_description.clone();
        self.appliances = self.original.appliances.clone();
        self.parts = self.original.parts.clone();
        self.removed_ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::order::ApplianceType;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn appliance_item(id: Option<Uuid>, labor: Option<&str>) -> ApplianceItem {
        ApplianceItem {
            id,
            appliance_type: ApplianceType::MicroOndas,
            brand: Some("Electrolux".to_string()),
            model: None,
            voltage: None,
            serial_number: None,
            customer_note: None,
            labor_value: labor.map(dec),
        }
    }

    fn part_item(id: Option<Uuid>, component_id: Uuid, price: &str, quantity: i32) -> PartItem {
        PartItem {
            id,
            component_id: Some(component_id),
            name: "peça".to_string(),
            unit_price: dec(price),
            quantity,
            removed: false,
        }
    }

    fn catalog_component(id: Uuid, price: &str) -> Component {
        Component {
            id,
            name: "Compressor".to_string(),
            brand: None,
            category: None,
            quantity: 10,
            unit_price: dec(price),
            supplier: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn snapshot(appliances: Vec<ApplianceItem>, parts: Vec<PartItem>) -> OrderSnapshot {
        OrderSnapshot {
            status: OrderStatus::NaoIniciado,
            service_description: None,
            discount: Decimal::ZERO,
            appliances,
            parts,
        }
    }

    #[test]
    fn removing_persisted_appliance_tracks_its_id() {
        let id = Uuid::new_v4();
        let mut session = EditSession::open(snapshot(vec![appliance_item(Some(id), None)], vec![]));

        session.remove_appliance(0).unwrap();

        assert!(session.appliances().is_empty());
        assert_eq!(session.removed_ids().len(), 1);
        assert!(session.removed_ids().contains(&id));
    }

    #[test]
    fn removing_new_appliance_has_no_network_effect() {
        let mut session = EditSession::open(snapshot(vec![], vec![]));
        session.add_appliance(appliance_item(Some(Uuid::new_v4()), None)); // id é zerado na adição

        session.remove_appliance(0).unwrap();

        assert!(session.appliances().is_empty());
        assert!(session.removed_ids().is_empty());
    }

    #[test]
    fn delete_set_size_equals_persisted_removals() {
        let persisted_a = Uuid::new_v4();
        let persisted_b = Uuid::new_v4();
        let mut session = EditSession::open(snapshot(
            vec![
                appliance_item(Some(persisted_a), None),
                appliance_item(Some(persisted_b), None),
            ],
            vec![],
        ));
        session.add_appliance(appliance_item(None, None));

        // Três remoções, duas delas de itens persistidos.
        session.remove_appliance(2).unwrap();
        session.remove_appliance(1).unwrap();
        session.remove_appliance(0).unwrap();

        assert_eq!(session.removed_ids().len(), 2);
    }

    #[test]
    fn part_removal_is_a_sentinel_not_a_splice() {
        let component_id = Uuid::new_v4();
        let mut session = EditSession::open(snapshot(
            vec![],
            vec![
                part_item(Some(Uuid::new_v4()), component_id, "10.00", 2),
                part_item(Some(Uuid::new_v4()), Uuid::new_v4(), "4.00", 1),
            ],
        ));

        session.mark_part_removed(0).unwrap();

        // O vetor de trabalho não encolhe; a linha removida fica com
        // quantidade 0 e flag ligada.
        assert_eq!(session.parts().len(), 2);
        assert_eq!(session.parts()[0].quantity, 0);
        assert!(session.parts()[0].removed);

        // A lista ativa é exatamente o vetor filtrado por "não removida".
        let active = session.active_parts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].unit_price, dec("4.00"));
    }

    #[test]
    fn quantity_zero_marks_removal() {
        let mut session = EditSession::open(snapshot(
            vec![],
            vec![part_item(Some(Uuid::new_v4()), Uuid::new_v4(), "10.00", 2)],
        ));

        session.set_part_quantity(0, 0).unwrap();
        assert!(session.parts()[0].removed);

        // E a remoção entra no plano de deleção por ser persistida.
        let plan = session.save_plan();
        assert_eq!(plan.delete_ids.len(), 1);
        assert!(plan.patch.parts.is_empty());
    }

    #[test]
    fn duplicate_component_is_rejected_without_growing_the_list() {
        let component = catalog_component(Uuid::new_v4(), "15.00");
        let mut session = EditSession::open(snapshot(
            vec![],
            vec![part_item(Some(Uuid::new_v4()), component.id, "15.00", 1)],
        ));

        let result = session.add_part(&component, 2);
        assert_eq!(result, Err(ReconcileError::DuplicatePart));
        assert_eq!(session.parts().len(), 1);
    }

    #[test]
    fn removed_part_component_can_be_added_again() {
        let component = catalog_component(Uuid::new_v4(), "15.00");
        let mut session = EditSession::open(snapshot(
            vec![],
            vec![part_item(Some(Uuid::new_v4()), component.id, "15.00", 1)],
        ));

        session.mark_part_removed(0).unwrap();
        session.add_part(&component, 2).unwrap();
        assert_eq!(session.active_parts().len(), 1);
    }

    #[test]
    fn snapshot_price_is_copied_by_value() {
        let mut component = catalog_component(Uuid::new_v4(), "10.00");
        let mut session = EditSession::open(snapshot(vec![], vec![]));
        session.add_part(&component, 2).unwrap();

        // Reajuste posterior no catálogo não altera a linha da ordem.
        component.unit_price = dec("99.00");
        assert_eq!(session.parts()[0].unit_price, dec("10.00"));
    }

    #[test]
    fn save_plan_deletes_before_patching_and_patch_omits_removed() {
        // Ordem com um aparelho persistido, aparelho removido, save.
        let appliance_id = Uuid::new_v4();
        let part_id = Uuid::new_v4();
        let mut session = EditSession::open(snapshot(
            vec![appliance_item(Some(appliance_id), Some("50.00"))],
            vec![part_item(Some(part_id), Uuid::new_v4(), "10.00", 2)],
        ));

        session.remove_appliance(0).unwrap();
        session.set_status(OrderStatus::EmAndamento);

        let plan = session.save_plan();
        assert_eq!(plan.delete_ids, vec![appliance_id]);
        assert!(plan.patch.appliances.iter().all(|a| a.id != Some(appliance_id)));
        assert_eq!(plan.patch.status, OrderStatus::EmAndamento);
        assert_eq!(plan.patch.parts.len(), 1);
        assert_eq!(plan.patch.parts[0].id, Some(part_id));
    }

    #[test]
    fn failed_save_keeps_pending_removals_for_retry() {
        let appliance_id = Uuid::new_v4();
        let mut session =
            EditSession::open(snapshot(vec![appliance_item(Some(appliance_id), None)], vec![]));
        session.remove_appliance(0).unwrap();

        // Sem commit (save falhou), o plano seguinte repete os deletes.
        let retry = session.save_plan();
        assert_eq!(retry.delete_ids, vec![appliance_id]);

        session.commit();
        assert!(session.removed_ids().is_empty());
        assert!(session.save_plan().delete_ids.is_empty());
    }

    #[test]
    fn cancel_discards_edits_and_pending_removals() {
        let appliance_id = Uuid::new_v4();
        let mut session = EditSession::open(snapshot(
            vec![appliance_item(Some(appliance_id), Some("50.00"))],
            vec![part_item(Some(Uuid::new_v4()), Uuid::new_v4(), "10.00", 1)],
        ));

        session.remove_appliance(0).unwrap();
        session.mark_part_removed(0).unwrap();
        session.set_status(OrderStatus::Finalizado);
        session.cancel();

        assert_eq!(session.appliances().len(), 1);
        assert_eq!(session.appliances()[0].id, Some(appliance_id));
        assert!(!session.parts()[0].removed);
        assert_eq!(session.status(), OrderStatus::NaoIniciado);
        assert!(session.removed_ids().is_empty());
    }

    #[test]
    fn totals_rederive_from_active_lines() {
        let mut session = EditSession::open(snapshot(
            vec![appliance_item(None, Some("50.00"))],
            vec![part_item(Some(Uuid::new_v4()), Uuid::new_v4(), "10.00", 2)],
        ));

        assert_eq!(session.totals().total_value, dec("70.00"));

        session.mark_part_removed(0).unwrap();
        assert_eq!(session.totals().total_value, dec("50.00"));
    }
}
