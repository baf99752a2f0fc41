//! Dispatch-order lifecycle operations.
//!
//! Each public method is one complete invocation body: preconditions are
//! validated by reads first, writes are issued only once the whole
//! operation is known to succeed, and any error aborts the invocation so
//! the host discards every write attempted by it.

use tradeledger_core::{
    DocumentId, InvoiceId, LedgerError, LedgerResult, OrderId, Record, TxContext, VoucherId,
    fields,
};
use tradeledger_pricing::voucher_amount;
use tradeledger_store::{TableStore, WorldState};

use crate::asset::{Asset, MAPPED};
use crate::document::Document;
use crate::history::{TransactionHistoryRecord, record_transition};
use crate::invoice::Invoice;
use crate::order::{DispatchOrder, OrderDetails};
use crate::stage::Stage;
use crate::tables;
use crate::voucher::Voucher;

/// Mutating surface of the shipment variant.
pub struct DispatchService<'a, S: WorldState> {
    store: &'a mut TableStore<S>,
    ctx: &'a TxContext,
}

impl<'a, S: WorldState> DispatchService<'a, S> {
    pub fn new(store: &'a mut TableStore<S>, ctx: &'a TxContext) -> Self {
        Self { store, ctx }
    }

    /// Create a dispatch order at stage CREATED.
    pub fn create_order(&mut self, order_id: OrderId, details: OrderDetails) -> LedgerResult<()> {
        if self.store.find(tables::ORDERS, &[order_id.as_str()])?.is_some() {
            return Err(LedgerError::conflict(format!(
                "dispatch order {order_id} already exists"
            )));
        }
        let order = DispatchOrder::created(order_id, details, self.ctx.compact_time());
        self.store.insert(
            tables::ORDERS,
            &[order.dispatch_order_id.as_str()],
            order.to_bytes()?,
        )?;
        record_transition(
            self.store,
            self.ctx,
            &order.dispatch_order_id,
            order.stage,
            &order.details.transaction_description,
        )
    }

    /// Full field replacement of an existing order (identity preserved).
    pub fn update_order(
        &mut self,
        order_id: OrderId,
        stage: Stage,
        details: OrderDetails,
    ) -> LedgerResult<()> {
        let current = load_order(self.store, &order_id)?;
        self.ensure_transition(&current, stage)?;
        let updated = DispatchOrder {
            dispatch_order_id: order_id,
            stage,
            details,
            time_stamp: self.ctx.compact_time(),
        };
        self.store.replace(
            tables::ORDERS,
            &[updated.dispatch_order_id.as_str()],
            updated.to_bytes()?,
        )?;
        record_transition(
            self.store,
            self.ctx,
            &updated.dispatch_order_id,
            updated.stage,
            &updated.details.transaction_description,
        )
    }

    /// Register an asset. No audit row: assets have no order yet.
    pub fn create_asset(&mut self, asset: Asset) -> LedgerResult<()> {
        let bytes = asset.to_bytes()?;
        self.store.insert(
            tables::ASSETS,
            &[asset.asset_id.as_str(), &asset.owner],
            bytes,
        )
    }

    /// Register an immutable document.
    pub fn create_document(
        &mut self,
        document_id: DocumentId,
        document_name: String,
        document_type: String,
        document_string: String,
    ) -> LedgerResult<()> {
        let document = Document {
            document_id,
            document_name,
            document_type,
            document_string,
            created_on: self.ctx.compact_time(),
        };
        let bytes = document.to_bytes()?;
        self.store.insert(
            tables::DOCUMENTS,
            &[document.document_id.as_str(), &document.created_on],
            bytes,
        )
    }

    /// Map a comma-joined list of assets onto an order.
    ///
    /// Fail-fast, first-error-wins: a missing asset aborts the invocation
    /// and the host discards the earlier iterations' writes with it, so no
    /// partially mapped state survives.
    pub fn map_assets(&mut self, order_id: OrderId, asset_ids: &str) -> LedgerResult<usize> {
        let mut order = load_order(self.store, &order_id)?;
        let ids = fields::split_id_list(asset_ids);
        if ids.is_empty() {
            return Err(LedgerError::validation(format!(
                "no asset ids supplied for order {order_id}"
            )));
        }

        for raw in &ids {
            let mut asset = find_asset(self.store, raw)?;
            asset.order_id = order_id.to_string();
            asset.stage = MAPPED.to_string();
            let bytes = asset.to_bytes()?;
            self.store.replace(
                tables::ASSETS,
                &[asset.asset_id.as_str(), &asset.owner],
                bytes,
            )?;
        }

        order.details.asset_ids = ids.join(",");
        order.time_stamp = self.ctx.compact_time();
        self.store
            .replace(tables::ORDERS, &[order_id.as_str()], order.to_bytes()?)?;
        record_transition(
            self.store,
            self.ctx,
            &order_id,
            order.stage,
            &order.details.transaction_description,
        )?;
        Ok(ids.len())
    }

    /// Raise a voucher against an order and advance it to VOUCHER_CREATED.
    ///
    /// The amount is computed once by the tariff engine and immutable
    /// thereafter except through [`update_voucher`](Self::update_voucher).
    pub fn create_voucher(
        &mut self,
        order_id: OrderId,
        details: OrderDetails,
    ) -> LedgerResult<Voucher> {
        let current = load_order(self.store, &order_id)?;
        self.ensure_transition(&current, Stage::VoucherCreated)?;

        let weight = fields::parse_int("weight", &details.weight)?;
        let weight = u64::try_from(weight).map_err(|_| {
            LedgerError::validation(format!(
                "weight must not be negative, got {:?}",
                details.weight
            ))
        })?;
        let amount = voucher_amount(
            &details.loading_type,
            &details.vehicle_type,
            &details.customer,
            weight,
        );

        let voucher = Voucher {
            voucher_id: VoucherId::from(&order_id),
            dispatch_order_id: order_id.clone(),
            stage: Stage::VoucherCreated,
            details: details.clone(),
            time_stamp: self.ctx.compact_time(),
            amount: amount.to_string(),
        };
        self.store.insert(
            tables::VOUCHERS,
            &[voucher.voucher_id.as_str()],
            voucher.to_bytes()?,
        )?;

        let order = DispatchOrder {
            dispatch_order_id: order_id.clone(),
            stage: Stage::VoucherCreated,
            details,
            time_stamp: self.ctx.compact_time(),
        };
        self.store
            .replace(tables::ORDERS, &[order_id.as_str()], order.to_bytes()?)?;
        record_transition(
            self.store,
            self.ctx,
            &order_id,
            Stage::VoucherCreated,
            &voucher.details.transaction_description,
        )?;
        Ok(voucher)
    }

    /// Replace an existing voucher and advance the owning order to
    /// VOUCHER_VALIDATED.
    pub fn update_voucher(
        &mut self,
        voucher_id: VoucherId,
        order_id: OrderId,
        details: OrderDetails,
        amount: String,
    ) -> LedgerResult<()> {
        fields::parse_int("voucher amount", &amount)?;
        let current = load_order(self.store, &order_id)?;
        self.ensure_transition(&current, Stage::VoucherValidated)?;

        let voucher = Voucher {
            voucher_id,
            dispatch_order_id: order_id.clone(),
            stage: Stage::VoucherValidated,
            details: details.clone(),
            time_stamp: self.ctx.compact_time(),
            amount,
        };
        self.store.replace(
            tables::VOUCHERS,
            &[voucher.voucher_id.as_str()],
            voucher.to_bytes()?,
        )?;

        let order = DispatchOrder {
            dispatch_order_id: order_id.clone(),
            stage: Stage::VoucherValidated,
            details,
            time_stamp: self.ctx.compact_time(),
        };
        self.store
            .replace(tables::ORDERS, &[order_id.as_str()], order.to_bytes()?)?;
        record_transition(
            self.store,
            self.ctx,
            &order_id,
            Stage::VoucherValidated,
            &voucher.details.transaction_description,
        )
    }

    /// Aggregate vouchers into an invoice and stamp every touched voucher
    /// and owning order INVOICE_GENERATED.
    ///
    /// All lookups happen before the first write: a missing voucher or
    /// order aborts the call with nothing written, so no invoice can refer
    /// to state it did not stamp.
    pub fn create_invoice(
        &mut self,
        invoice_id: InvoiceId,
        voucher_ids: &str,
    ) -> LedgerResult<Invoice> {
        if self
            .store
            .find(tables::INVOICES, &[invoice_id.as_str()])?
            .is_some()
        {
            return Err(LedgerError::conflict(format!(
                "invoice {invoice_id} already exists"
            )));
        }
        let ids = fields::split_id_list(voucher_ids);
        if ids.is_empty() {
            return Err(LedgerError::validation(format!(
                "invoice {invoice_id} requires at least one voucher"
            )));
        }

        let mut total: i64 = 0;
        let mut touched = Vec::with_capacity(ids.len());
        for raw in &ids {
            let voucher = load_voucher(self.store, &VoucherId::new(*raw)?)?;
            let order = load_order(self.store, &voucher.dispatch_order_id)?;
            self.ensure_transition(&order, Stage::InvoiceGenerated)?;
            total += fields::parse_int("voucher amount", &voucher.amount)?;
            touched.push((voucher, order));
        }

        for (mut voucher, mut order) in touched {
            voucher.stage = Stage::InvoiceGenerated;
            order.stage = Stage::InvoiceGenerated;
            order.time_stamp = self.ctx.compact_time();
            let description = voucher.details.transaction_description.clone();
            self.store.replace(
                tables::VOUCHERS,
                &[voucher.voucher_id.as_str()],
                voucher.to_bytes()?,
            )?;
            self.store.replace(
                tables::ORDERS,
                &[order.dispatch_order_id.as_str()],
                order.to_bytes()?,
            )?;
            record_transition(
                self.store,
                self.ctx,
                &order.dispatch_order_id,
                Stage::InvoiceGenerated,
                &description,
            )?;
        }

        let invoice = Invoice {
            invoice_id,
            voucher_list: ids.join(","),
            stage: Stage::InvoiceGenerated,
            amount: total.to_string(),
        };
        self.store.insert(
            tables::INVOICES,
            &[invoice.invoice_id.as_str()],
            invoice.to_bytes()?,
        )?;
        Ok(invoice)
    }

    /// Validate a generated invoice and cascade INVOICE_VALIDATED to every
    /// linked voucher and its owning order.
    pub fn validate_invoice(&mut self, invoice_id: InvoiceId) -> LedgerResult<Invoice> {
        let mut invoice = load_invoice(self.store, &invoice_id)?;
        if invoice.stage != Stage::InvoiceGenerated {
            return Err(LedgerError::precondition(format!(
                "invoice {invoice_id} is not awaiting validation (stage {})",
                invoice.stage
            )));
        }

        let mut touched = Vec::new();
        for raw in invoice.voucher_ids() {
            let voucher = load_voucher(self.store, &VoucherId::new(raw)?)?;
            let order = load_order(self.store, &voucher.dispatch_order_id)?;
            touched.push((voucher, order));
        }

        for (mut voucher, mut order) in touched {
            voucher.stage = Stage::InvoiceValidated;
            order.stage = Stage::InvoiceValidated;
            order.time_stamp = self.ctx.compact_time();
            let description = voucher.details.transaction_description.clone();
            self.store.replace(
                tables::VOUCHERS,
                &[voucher.voucher_id.as_str()],
                voucher.to_bytes()?,
            )?;
            self.store.replace(
                tables::ORDERS,
                &[order.dispatch_order_id.as_str()],
                order.to_bytes()?,
            )?;
            record_transition(
                self.store,
                self.ctx,
                &order.dispatch_order_id,
                Stage::InvoiceValidated,
                &description,
            )?;
        }

        invoice.stage = Stage::InvoiceValidated;
        self.store.replace(
            tables::INVOICES,
            &[invoice.invoice_id.as_str()],
            invoice.to_bytes()?,
        )?;
        Ok(invoice)
    }

    fn ensure_transition(&self, order: &DispatchOrder, next: Stage) -> LedgerResult<()> {
        if !order.stage.allows(next) {
            return Err(LedgerError::precondition(format!(
                "dispatch order {} cannot move from stage {} to {}",
                order.dispatch_order_id, order.stage, next
            )));
        }
        Ok(())
    }
}

/// Load an order by id.
pub fn load_order<S: WorldState>(
    store: &TableStore<S>,
    order_id: &OrderId,
) -> LedgerResult<DispatchOrder> {
    let bytes = store.get_exact(tables::ORDERS, &[order_id.as_str()])?;
    DispatchOrder::from_bytes(&bytes)
}

/// Load a voucher by id.
pub fn load_voucher<S: WorldState>(
    store: &TableStore<S>,
    voucher_id: &VoucherId,
) -> LedgerResult<Voucher> {
    let bytes = store.get_exact(tables::VOUCHERS, &[voucher_id.as_str()])?;
    Voucher::from_bytes(&bytes)
}

/// Load an invoice by id.
pub fn load_invoice<S: WorldState>(
    store: &TableStore<S>,
    invoice_id: &InvoiceId,
) -> LedgerResult<Invoice> {
    let bytes = store.get_exact(tables::INVOICES, &[invoice_id.as_str()])?;
    Invoice::from_bytes(&bytes)
}

/// First asset whose id matches, regardless of owner.
pub fn find_asset<S: WorldState>(store: &TableStore<S>, asset_id: &str) -> LedgerResult<Asset> {
    let rows = store.query_by_prefix(tables::ASSETS, &[asset_id])?;
    let row = rows
        .first()
        .ok_or_else(|| LedgerError::not_found(format!("asset {asset_id}")))?;
    Asset::from_bytes(&row.payload)
}

/// Every order, in store-native order.
pub fn all_orders<S: WorldState>(store: &TableStore<S>) -> LedgerResult<Vec<DispatchOrder>> {
    store
        .query_by_prefix(tables::ORDERS, &[])?
        .iter()
        .map(|row| DispatchOrder::from_bytes(&row.payload))
        .collect()
}

/// Assets matching a leading key prefix (asset id, then owner).
pub fn assets_by_prefix<S: WorldState>(
    store: &TableStore<S>,
    prefix: &[&str],
) -> LedgerResult<Vec<Asset>> {
    store
        .query_by_prefix(tables::ASSETS, prefix)?
        .iter()
        .map(|row| Asset::from_bytes(&row.payload))
        .collect()
}

/// Documents matching a leading key prefix (document id, then created-on).
pub fn documents_by_prefix<S: WorldState>(
    store: &TableStore<S>,
    prefix: &[&str],
) -> LedgerResult<Vec<Document>> {
    store
        .query_by_prefix(tables::DOCUMENTS, prefix)?
        .iter()
        .map(|row| Document::from_bytes(&row.payload))
        .collect()
}

/// Vouchers matching a leading key prefix (voucher id or nothing).
pub fn vouchers_by_prefix<S: WorldState>(
    store: &TableStore<S>,
    prefix: &[&str],
) -> LedgerResult<Vec<Voucher>> {
    store
        .query_by_prefix(tables::VOUCHERS, prefix)?
        .iter()
        .map(|row| Voucher::from_bytes(&row.payload))
        .collect()
}

/// Invoices matching a leading key prefix (invoice id or nothing).
pub fn invoices_by_prefix<S: WorldState>(
    store: &TableStore<S>,
    prefix: &[&str],
) -> LedgerResult<Vec<Invoice>> {
    store
        .query_by_prefix(tables::INVOICES, prefix)?
        .iter()
        .map(|row| Invoice::from_bytes(&row.payload))
        .collect()
}

/// Audit trail of one order, in store-native order.
pub fn order_history<S: WorldState>(
    store: &TableStore<S>,
    order_id: &OrderId,
) -> LedgerResult<Vec<TransactionHistoryRecord>> {
    store
        .query_by_prefix(tables::ORDER_HISTORY, &[order_id.as_str()])?
        .iter()
        .map(|row| TransactionHistoryRecord::from_bytes(&row.payload))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tradeledger_core::AssetId;
    use tradeledger_store::InMemoryWorldState;

    use crate::order::fixtures::details;

    fn store() -> TableStore<InMemoryWorldState> {
        let mut store = TableStore::new(InMemoryWorldState::new());
        store.reset_tables(tables::SCHEMA).unwrap();
        store
    }

    fn ctx_at(minute: u32) -> TxContext {
        TxContext::new(
            format!("tx-{minute}"),
            "dispatch-officer",
            Utc.with_ymd_and_hms(2016, 7, 17, 15, minute, 0).unwrap(),
        )
    }

    fn order_id() -> OrderId {
        OrderId::new("OBD-1").unwrap()
    }

    fn asset(id: &str, owner: &str) -> Asset {
        Asset {
            asset_id: AssetId::new(id).unwrap(),
            part_number: "P-553".into(),
            part_description: "Axle housing".into(),
            owner: owner.into(),
            stage: String::new(),
            batch_number: "B-1".into(),
            manufacture_date: "2016-06-30".into(),
            itchs: "8708".into(),
            excise_chapter_number: "87".into(),
            order_id: String::new(),
        }
    }

    #[test]
    fn duplicate_order_create_is_a_conflict_and_preserves_the_original() {
        let mut store = store();
        let ctx = ctx_at(0);
        DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), details())
            .unwrap();

        let ctx = ctx_at(1);
        let mut second = details();
        second.customer = "Ford Chennai".into();
        let err = DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), second)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Conflict(_)));

        let kept = load_order(&store, &order_id()).unwrap();
        assert_eq!(kept.details.customer, "Maruthi Pune");
    }

    #[test]
    fn create_writes_exactly_one_history_row() {
        let mut store = store();
        let ctx = ctx_at(0);
        DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), details())
            .unwrap();

        let trail = order_history(&store, &order_id()).unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].stage, Stage::Created);
        assert_eq!(trail[0].user, "dispatch-officer");
        assert_eq!(trail[0].timestamp, "2016-07-17 15:00:00");
    }

    #[test]
    fn missing_caller_identity_aborts_the_mutation() {
        let mut store = store();
        let ctx = TxContext::anonymous(
            "tx-anon",
            Utc.with_ymd_and_hms(2016, 7, 17, 15, 0, 0).unwrap(),
        );
        let err = DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), details())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn update_requires_an_existing_order_and_a_forward_stage() {
        let mut store = store();
        let ctx = ctx_at(0);
        let err = DispatchService::new(&mut store, &ctx)
            .update_order(order_id(), Stage::InTransit, details())
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));

        DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), details())
            .unwrap();
        let ctx = ctx_at(1);
        DispatchService::new(&mut store, &ctx)
            .update_order(order_id(), Stage::Delivered, details())
            .unwrap();

        let ctx = ctx_at(2);
        let err = DispatchService::new(&mut store, &ctx)
            .update_order(order_id(), Stage::InTransit, details())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Precondition(_)));
    }

    #[test]
    fn map_assets_fails_fast_on_a_missing_asset() {
        let mut store = store();
        let ctx = ctx_at(0);
        let mut service = DispatchService::new(&mut store, &ctx);
        service.create_order(order_id(), details()).unwrap();
        service.create_asset(asset("AST-1", "Plant 2")).unwrap();

        let ctx = ctx_at(1);
        let err = DispatchService::new(&mut store, &ctx)
            .map_assets(order_id(), "AST-1,AST-404")
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(msg) if msg.contains("AST-404")));
    }

    #[test]
    fn map_assets_stamps_assets_and_republishes_the_order() {
        let mut store = store();
        let ctx = ctx_at(0);
        let mut service = DispatchService::new(&mut store, &ctx);
        service.create_order(order_id(), details()).unwrap();
        service.create_asset(asset("AST-1", "Plant 2")).unwrap();
        service.create_asset(asset("AST-2", "Plant 2")).unwrap();

        let ctx = ctx_at(1);
        let mapped = DispatchService::new(&mut store, &ctx)
            .map_assets(order_id(), "AST-1,AST-2")
            .unwrap();
        assert_eq!(mapped, 2);

        let stored = find_asset(&store, "AST-1").unwrap();
        assert_eq!(stored.stage, MAPPED);
        assert_eq!(stored.order_id, "OBD-1");
        let order = load_order(&store, &order_id()).unwrap();
        assert_eq!(order.details.asset_ids, "AST-1,AST-2");
    }

    #[test]
    fn voucher_creation_prices_the_shipment_and_advances_the_order() {
        let mut store = store();
        let ctx = ctx_at(0);
        DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), details())
            .unwrap();

        let ctx = ctx_at(1);
        let voucher = DispatchService::new(&mut store, &ctx)
            .create_voucher(order_id(), details())
            .unwrap();
        // LTL, Maruthi Pune, weight 10.
        assert_eq!(voucher.amount, "25000");
        assert_eq!(voucher.voucher_id.as_str(), "OBD-1");

        let order = load_order(&store, &order_id()).unwrap();
        assert_eq!(order.stage, Stage::VoucherCreated);
        assert_eq!(order_history(&store, &order_id()).unwrap().len(), 2);
    }

    #[test]
    fn voucher_creation_rejects_non_numeric_weight() {
        let mut store = store();
        let ctx = ctx_at(0);
        let mut fields = details();
        fields.weight = "heavy".into();
        DispatchService::new(&mut store, &ctx)
            .create_order(order_id(), fields.clone())
            .unwrap();

        let ctx = ctx_at(1);
        let err = DispatchService::new(&mut store, &ctx)
            .create_voucher(order_id(), fields)
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(msg) if msg.contains("weight")));
    }

    fn vouchered_order(store: &mut TableStore<InMemoryWorldState>, id: &str) -> VoucherId {
        let order_id = OrderId::new(id).unwrap();
        let ctx = ctx_at(0);
        DispatchService::new(store, &ctx)
            .create_order(order_id.clone(), details())
            .unwrap();
        let ctx = ctx_at(1);
        let voucher = DispatchService::new(store, &ctx)
            .create_voucher(order_id, details())
            .unwrap();
        voucher.voucher_id
    }

    #[test]
    fn invoice_aggregates_voucher_amounts() {
        let mut store = store();
        let v1 = vouchered_order(&mut store, "OBD-1");
        let v2 = vouchered_order(&mut store, "OBD-2");

        let ctx = ctx_at(2);
        let invoice = DispatchService::new(&mut store, &ctx)
            .create_invoice(
                InvoiceId::new("INV-1").unwrap(),
                &format!("{},{}", v1.as_str(), v2.as_str()),
            )
            .unwrap();
        assert_eq!(invoice.amount, "50000");
        assert_eq!(invoice.stage, Stage::InvoiceGenerated);

        let order = load_order(&store, &OrderId::new("OBD-1").unwrap()).unwrap();
        assert_eq!(order.stage, Stage::InvoiceGenerated);
        let voucher = load_voucher(&store, &v1).unwrap();
        assert_eq!(voucher.stage, Stage::InvoiceGenerated);
    }

    #[test]
    fn invoice_with_a_missing_voucher_writes_nothing() {
        let mut store = store();
        let v1 = vouchered_order(&mut store, "OBD-1");

        let ctx = ctx_at(2);
        let err = DispatchService::new(&mut store, &ctx)
            .create_invoice(
                InvoiceId::new("INV-1").unwrap(),
                &format!("{},V-404", v1.as_str()),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));

        // Nothing was stamped and no invoice row exists.
        assert!(load_invoice(&store, &InvoiceId::new("INV-1").unwrap()).is_err());
        let voucher = load_voucher(&store, &v1).unwrap();
        assert_eq!(voucher.stage, Stage::VoucherCreated);
    }

    #[test]
    fn validate_invoice_cascades_to_vouchers_and_orders() {
        let mut store = store();
        let v1 = vouchered_order(&mut store, "OBD-1");

        let ctx = ctx_at(2);
        DispatchService::new(&mut store, &ctx)
            .create_invoice(InvoiceId::new("INV-1").unwrap(), v1.as_str())
            .unwrap();
        let ctx = ctx_at(3);
        let invoice = DispatchService::new(&mut store, &ctx)
            .validate_invoice(InvoiceId::new("INV-1").unwrap())
            .unwrap();
        assert_eq!(invoice.stage, Stage::InvoiceValidated);

        let order = load_order(&store, &OrderId::new("OBD-1").unwrap()).unwrap();
        assert_eq!(order.stage, Stage::InvoiceValidated);
        assert_eq!(load_voucher(&store, &v1).unwrap().stage, Stage::InvoiceValidated);
    }

    #[test]
    fn validate_invoice_guards_the_stage_and_touches_nothing_on_failure() {
        let mut store = store();
        let v1 = vouchered_order(&mut store, "OBD-1");

        let ctx = ctx_at(2);
        DispatchService::new(&mut store, &ctx)
            .create_invoice(InvoiceId::new("INV-1").unwrap(), v1.as_str())
            .unwrap();
        let ctx = ctx_at(3);
        DispatchService::new(&mut store, &ctx)
            .validate_invoice(InvoiceId::new("INV-1").unwrap())
            .unwrap();

        // A second validation must fail and leave the cascade untouched.
        let ctx = ctx_at(4);
        let err = DispatchService::new(&mut store, &ctx)
            .validate_invoice(InvoiceId::new("INV-1").unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Precondition(_)));
        let order = load_order(&store, &OrderId::new("OBD-1").unwrap()).unwrap();
        assert_eq!(order.stage, Stage::InvoiceValidated);
    }

    #[test]
    fn documents_are_written_under_their_creation_stamp() {
        let mut store = store();
        let ctx = ctx_at(0);
        DispatchService::new(&mut store, &ctx)
            .create_document(
                DocumentId::new("DOC-1").unwrap(),
                "packing list".into(),
                "pdf".into(),
                "…".into(),
            )
            .unwrap();
        let docs = documents_by_prefix(&store, &["DOC-1"]).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].created_on, "20160717150000");
    }
}
