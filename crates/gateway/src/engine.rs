//! Invocation engine: composes both variants' services over one store.
//!
//! The engine is the only layer the host talks to. `deploy` re-initializes
//! every declared table, `invoke` executes one mutating command inside the
//! host's transaction boundary, `query` serves the read surface. Errors
//! abort the invocation; the engine never partially applies at the host
//! boundary.

use serde::Serialize;

use tradeledger_auction::{AuctionService, Bid, service as auction};
use tradeledger_core::{LedgerError, LedgerResult, Record, TxContext};
use tradeledger_dispatch::{
    DispatchOrder, DispatchService, Invoice, Voucher, service as dispatch,
};
use tradeledger_store::{TableStore, WorldState};

use crate::command::Command;
use crate::query::Query;

/// Application version recorded at deploy time.
pub const APP_VERSION: &str = "23";

/// Deploy metadata (version row).
const META: &str = "meta";

pub struct Engine<S: WorldState> {
    store: TableStore<S>,
}

impl<S: WorldState> Engine<S> {
    pub fn new(state: S) -> Self {
        Self {
            store: TableStore::new(state),
        }
    }

    /// Full re-init: drop and recreate every table of both variants, then
    /// record the application version.
    pub fn deploy(&mut self) -> LedgerResult<()> {
        let mut tables: Vec<(&str, usize)> = vec![(META, 1)];
        tables.extend_from_slice(tradeledger_dispatch::tables::SCHEMA);
        tables.extend_from_slice(tradeledger_auction::tables::SCHEMA);
        self.store.reset_tables(&tables)?;
        self.store
            .insert(META, &["version"], APP_VERSION.as_bytes().to_vec())?;
        tracing::info!(version = APP_VERSION, "deploy complete");
        Ok(())
    }

    /// Execute one mutating command. The returned payload mirrors what the
    /// operation persisted (empty for plain acknowledgements).
    pub fn invoke(&mut self, ctx: &TxContext, command: Command) -> LedgerResult<Vec<u8>> {
        tracing::info!(tx_id = ctx.tx_id(), command = command.name(), "invoke");
        let result = self.apply(ctx, command);
        if let Err(err) = &result {
            tracing::warn!(tx_id = ctx.tx_id(), error = %err, "invocation aborted");
        }
        result
    }

    fn apply(&mut self, ctx: &TxContext, command: Command) -> LedgerResult<Vec<u8>> {
        match command {
            Command::CreateDispatchOrder { order_id, details } => {
                DispatchService::new(&mut self.store, ctx).create_order(order_id, details)?;
                Ok(Vec::new())
            }
            Command::UpdateDispatchOrder {
                order_id,
                stage,
                details,
            } => {
                DispatchService::new(&mut self.store, ctx)
                    .update_order(order_id, stage, details)?;
                Ok(Vec::new())
            }
            Command::CreateAsset { asset } => {
                DispatchService::new(&mut self.store, ctx).create_asset(asset)?;
                Ok(Vec::new())
            }
            Command::MapAsset {
                order_id,
                asset_ids,
            } => {
                DispatchService::new(&mut self.store, ctx).map_assets(order_id, &asset_ids)?;
                Ok(Vec::new())
            }
            Command::CreateDocument {
                document_id,
                document_name,
                document_type,
                document_string,
            } => {
                DispatchService::new(&mut self.store, ctx).create_document(
                    document_id,
                    document_name,
                    document_type,
                    document_string,
                )?;
                Ok(Vec::new())
            }
            Command::CreateVoucher { order_id, details } => {
                let voucher: Voucher = DispatchService::new(&mut self.store, ctx)
                    .create_voucher(order_id, details)?;
                voucher.to_bytes()
            }
            Command::UpdateVoucher {
                voucher_id,
                order_id,
                details,
                amount,
            } => {
                DispatchService::new(&mut self.store, ctx)
                    .update_voucher(voucher_id, order_id, details, amount)?;
                Ok(Vec::new())
            }
            Command::CreateInvoice {
                invoice_id,
                voucher_ids,
            } => {
                let invoice: Invoice = DispatchService::new(&mut self.store, ctx)
                    .create_invoice(invoice_id, &voucher_ids)?;
                invoice.to_bytes()
            }
            Command::ValidateInvoice { invoice_id } => {
                let invoice = DispatchService::new(&mut self.store, ctx)
                    .validate_invoice(invoice_id)?;
                invoice.to_bytes()
            }
            Command::PostUser { trader } => {
                AuctionService::new(&mut self.store, ctx).post_trader(trader)?;
                Ok(Vec::new())
            }
            Command::PostItem { item } => {
                AuctionService::new(&mut self.store, ctx).post_item(item)?;
                Ok(Vec::new())
            }
            Command::PostAuctionRequest { request } => {
                AuctionService::new(&mut self.store, ctx).post_auction_request(request)?;
                Ok(Vec::new())
            }
            Command::OpenAuctionForBids {
                auction_id,
                duration_minutes,
            } => {
                let auction = AuctionService::new(&mut self.store, ctx)
                    .open_auction(&auction_id, duration_minutes)?;
                auction.to_bytes()
            }
            Command::PlaceBid {
                auction_id,
                bid_no,
                item_id,
                buyer_id,
                bid_price,
            } => {
                let bid = AuctionService::new(&mut self.store, ctx)
                    .place_bid(auction_id, bid_no, item_id, buyer_id, bid_price)?;
                bid.to_bytes()
            }
            Command::CloseAuction { auction_id } => {
                let settled = AuctionService::new(&mut self.store, ctx)
                    .close_auction(&auction_id)?;
                to_json(&settled)
            }
            Command::BuyItNow {
                auction_id,
                item_id,
                buyer_id,
                offer_price,
            } => {
                let sale = AuctionService::new(&mut self.store, ctx)
                    .buy_it_now(auction_id, item_id, buyer_id, offer_price)?;
                sale.to_bytes()
            }
        }
    }

    /// Serve one read-only query.
    pub fn query(&self, query: Query) -> LedgerResult<Vec<u8>> {
        tracing::debug!(query = query.name(), "query");
        match query {
            Query::GetDispatchOrder { order_id } => {
                // Decode validates the stored shape; the raw payload is
                // what goes back over the wire.
                dispatch::load_order(&self.store, &order_id)?;
                self.store
                    .get_exact(tradeledger_dispatch::tables::ORDERS, &[order_id.as_str()])
            }
            Query::GetAllDispatchOrders => {
                let orders: Vec<DispatchOrder> = dispatch::all_orders(&self.store)?;
                to_json(&orders)
            }
            Query::GetAssets { prefix } => {
                let parts: Vec<&str> = prefix.iter().map(String::as_str).collect();
                to_json(&dispatch::assets_by_prefix(&self.store, &parts)?)
            }
            Query::GetDocuments { prefix } => {
                let parts: Vec<&str> = prefix.iter().map(String::as_str).collect();
                to_json(&dispatch::documents_by_prefix(&self.store, &parts)?)
            }
            Query::GetVouchers { prefix } => {
                let parts: Vec<&str> = prefix.iter().map(String::as_str).collect();
                to_json(&dispatch::vouchers_by_prefix(&self.store, &parts)?)
            }
            Query::GetInvoice { invoice_id } => {
                let invoice = dispatch::load_invoice(&self.store, &invoice_id)?;
                invoice.to_bytes()
            }
            Query::GetHistory { order_id } => {
                to_json(&dispatch::order_history(&self.store, &order_id)?)
            }
            Query::GetUser { user_id } => {
                let trader = auction::load_trader(&self.store, &user_id)?;
                trader.to_bytes()
            }
            Query::GetItem { item_id } => {
                let item = auction::load_item(&self.store, &item_id)?;
                item.to_bytes()
            }
            Query::GetAuctionRequest { auction_id } => {
                let request = auction::load_auction(&self.store, &auction_id)?;
                request.to_bytes()
            }
            Query::GetBid {
                auction_id,
                bid_no,
            } => {
                let bid = auction::load_bid(&self.store, &auction_id, &bid_no)?;
                bid.to_bytes()
            }
            Query::GetHighestBid { auction_id } => {
                let top: Option<Bid> = auction::highest_bid(&self.store, &auction_id)?;
                to_json(&top)
            }
            Query::GetLastBid { auction_id } => {
                let last: Option<Bid> = auction::last_bid(&self.store, &auction_id)?;
                to_json(&last)
            }
            Query::GetNoOfBids { auction_id } => {
                let count = auction::bid_count(&self.store, &auction_id)?;
                Ok(count.to_string().into_bytes())
            }
            Query::GetUsersByCategory { user_type } => {
                to_json(&auction::traders_by_category(&self.store, &user_type)?)
            }
            Query::GetInitAuctions => to_json(&auction::init_auctions(&self.store)?),
            Query::GetOpenAuctions => to_json(&auction::open_auctions(&self.store)?),
            Query::GetVersion => self.store.get_exact(META, &["version"]),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> LedgerResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| LedgerError::decode(format!("query result: {e}")))
}
