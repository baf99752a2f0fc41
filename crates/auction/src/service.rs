//! Auction lifecycle operations.
//!
//! Same invocation discipline as the dispatch side: reads validate every
//! precondition before a single write is issued, and any error aborts the
//! invocation. Opening an auction never waits for its duration — it only
//! records the window; the later CLOSED transition is a separate
//! invocation submitted by an external scheduler.

use chrono::Duration;

use tradeledger_core::{
    AuctionId, ItemId, LedgerError, LedgerResult, Record, TraderId, TxContext, fields,
};
use tradeledger_store::{TableStore, WorldState};

use crate::bid::Bid;
use crate::item::Item;
use crate::request::{AuctionRequest, AuctionStatus};
use crate::sale::{Sale, SaleKind};
use crate::tables;
use crate::tables::BUCKET_PARTITION;
use crate::trader::Trader;

/// Mutating surface of the auction variant.
pub struct AuctionService<'a, S: WorldState> {
    store: &'a mut TableStore<S>,
    ctx: &'a TxContext,
}

impl<'a, S: WorldState> AuctionService<'a, S> {
    pub fn new(store: &'a mut TableStore<S>, ctx: &'a TxContext) -> Self {
        Self { store, ctx }
    }

    /// Register (or overwrite) a trader.
    ///
    /// User ids must be numeric; duplicate registration is an idempotent
    /// overwrite, not a conflict.
    pub fn post_trader(&mut self, trader: Trader) -> LedgerResult<()> {
        fields::parse_int("user id", trader.user_id.as_str())?;
        let bytes = trader.to_bytes()?;
        upsert(
            self.store,
            tables::TRADERS,
            &[trader.user_id.as_str()],
            bytes.clone(),
        )?;
        upsert(
            self.store,
            tables::TRADERS_BY_CATEGORY,
            &[BUCKET_PARTITION, &trader.user_type, trader.user_id.as_str()],
            bytes,
        )
    }

    /// Register (or overwrite) an item.
    pub fn post_item(&mut self, item: Item) -> LedgerResult<()> {
        let bytes = item.to_bytes()?;
        upsert(self.store, tables::ITEMS, &[item.item_id.as_str()], bytes.clone())?;
        upsert(
            self.store,
            tables::ITEMS_BY_CATEGORY,
            &[BUCKET_PARTITION, &item.item_subject, item.item_id.as_str()],
            bytes,
        )
    }

    /// File an auction request. Status is forced to INIT; the request also
    /// lands in the INIT bucket for enumeration.
    pub fn post_auction_request(&mut self, request: AuctionRequest) -> LedgerResult<()> {
        if self
            .store
            .find(tables::TRADERS, &[request.auction_house_id.as_str()])?
            .is_none()
        {
            return Err(LedgerError::not_found(format!(
                "auction house {} is not registered",
                request.auction_house_id
            )));
        }
        if self
            .store
            .find(tables::ITEMS, &[request.item_id.as_str()])?
            .is_none()
        {
            return Err(LedgerError::not_found(format!(
                "item {} is not registered",
                request.item_id
            )));
        }
        fields::parse_int("reserve price", &request.reserve_price)?;

        let request = AuctionRequest {
            status: AuctionStatus::Init,
            ..request
        };
        let bytes = request.to_bytes()?;
        self.store.insert(
            tables::AUCTIONS,
            &[request.auction_id.as_str()],
            bytes.clone(),
        )?;
        self.store.insert(
            tables::AUCTIONS_INIT,
            &[BUCKET_PARTITION, request.auction_id.as_str()],
            bytes,
        )
    }

    /// Open an auction for bids.
    ///
    /// Assigns the bidding window from the invocation timestamp and moves
    /// the request from the INIT bucket to the OPEN bucket. Re-opening an
    /// already-open auction refreshes its window; a closed auction never
    /// reopens.
    pub fn open_auction(
        &mut self,
        auction_id: &AuctionId,
        duration_minutes: i64,
    ) -> LedgerResult<AuctionRequest> {
        let mut auction = load_auction(self.store, auction_id)?;
        if auction.status == AuctionStatus::Closed {
            return Err(LedgerError::precondition(format!(
                "auction {auction_id} is closed and cannot be opened for bids"
            )));
        }
        if duration_minutes <= 0 {
            return Err(LedgerError::validation(format!(
                "auction duration must be positive, got {duration_minutes}"
            )));
        }

        let opened_at = self.ctx.timestamp();
        let closes_at = opened_at + Duration::minutes(duration_minutes);
        auction.open_date = self.ctx.business_time();
        auction.close_date = closes_at
            .format(fields::BUSINESS_TIME_FORMAT)
            .to_string();
        let reopening = auction.status == AuctionStatus::Open;
        auction.status = AuctionStatus::Open;

        let bytes = auction.to_bytes()?;
        self.store
            .replace(tables::AUCTIONS, &[auction_id.as_str()], bytes.clone())?;
        if reopening {
            // Refresh the open-bucket copy in place.
            self.store.replace(
                tables::AUCTIONS_OPEN,
                &[BUCKET_PARTITION, auction_id.as_str()],
                bytes,
            )?;
        } else {
            self.store
                .delete(tables::AUCTIONS_INIT, &[BUCKET_PARTITION, auction_id.as_str()])?;
            self.store.insert(
                tables::AUCTIONS_OPEN,
                &[BUCKET_PARTITION, auction_id.as_str()],
                bytes,
            )?;
        }
        Ok(auction)
    }

    /// Close an open auction and settle the highest bid, if any.
    ///
    /// This is the invocation an external scheduler submits once the
    /// bidding window has elapsed; nothing in-process ever triggers it.
    pub fn close_auction(&mut self, auction_id: &AuctionId) -> LedgerResult<Option<Sale>> {
        let mut auction = load_auction(self.store, auction_id)?;
        if auction.status != AuctionStatus::Open {
            return Err(LedgerError::precondition(format!(
                "auction {auction_id} is not open (status {})",
                auction.status
            )));
        }
        let winner = highest_bid(self.store, auction_id)?;

        auction.status = AuctionStatus::Closed;
        self.store
            .replace(tables::AUCTIONS, &[auction_id.as_str()], auction.to_bytes()?)?;
        self.store
            .delete(tables::AUCTIONS_OPEN, &[BUCKET_PARTITION, auction_id.as_str()])?;

        match winner {
            Some(bid) => {
                let sale = Sale {
                    auction_id: auction.auction_id.clone(),
                    item_id: auction.item_id.clone(),
                    kind: SaleKind::Sale,
                    buyer_id: bid.buyer_id,
                    trans_date: self.ctx.business_time(),
                    hammer_time: bid.bid_time,
                    hammer_price: bid.bid_price,
                    details: "highest bid at close".into(),
                };
                self.store.insert(
                    tables::SALES,
                    &[sale.auction_id.as_str(), sale.item_id.as_str()],
                    sale.to_bytes()?,
                )?;
                Ok(Some(sale))
            }
            None => Ok(None),
        }
    }

    /// Accept a bid on an open auction.
    pub fn place_bid(
        &mut self,
        auction_id: AuctionId,
        bid_no: String,
        item_id: ItemId,
        buyer_id: TraderId,
        bid_price: String,
    ) -> LedgerResult<Bid> {
        fields::parse_int("bid no", &bid_no)?;
        if self
            .store
            .find(tables::TRADERS, &[buyer_id.as_str()])?
            .is_none()
        {
            return Err(LedgerError::not_found(format!(
                "buyer {buyer_id} is not registered"
            )));
        }

        let auction = load_auction(self.store, &auction_id)?;
        if auction.status != AuctionStatus::Open {
            return Err(LedgerError::precondition(format!(
                "auction {auction_id} is not open for bids (status {})",
                auction.status
            )));
        }

        let bid_time = self.ctx.business_time();
        let received = fields::parse_business_time("bid time", &bid_time)?;
        let closes = fields::parse_business_time("close date", &auction.close_date)?;
        if received > closes {
            return Err(LedgerError::precondition(format!(
                "bid on auction {auction_id} received after close ({bid_time} > {})",
                auction.close_date
            )));
        }

        if item_id != auction.item_id {
            return Err(LedgerError::validation(format!(
                "bid item {item_id} does not match auction item {}",
                auction.item_id
            )));
        }

        let price = fields::parse_positive_int("bid price", &bid_price)?;
        let reserve = fields::parse_int("reserve price", &auction.reserve_price)?;
        if price < reserve {
            return Err(LedgerError::precondition(format!(
                "bid price {price} is below the reserve price {reserve}"
            )));
        }

        let bid = Bid {
            auction_id,
            bid_no,
            item_id,
            buyer_id,
            bid_price,
            bid_time,
        };
        self.store.insert(
            tables::BIDS,
            &[bid.auction_id.as_str(), &bid.bid_no],
            bid.to_bytes()?,
        )?;
        Ok(bid)
    }

    /// Force-close an auction at a fixed price, unless bidding has already
    /// exceeded the offer.
    ///
    /// The absence of bids is not an error — it simply means nothing can
    /// outbid the offer.
    pub fn buy_it_now(
        &mut self,
        auction_id: AuctionId,
        item_id: ItemId,
        buyer_id: TraderId,
        offer_price: String,
    ) -> LedgerResult<Sale> {
        let offer = fields::parse_positive_int("buy-it-now price", &offer_price)?;
        if let Some(top) = highest_bid(self.store, &auction_id)? {
            let top_price = fields::parse_int("bid price", &top.bid_price)?;
            if top_price > offer {
                return Err(LedgerError::precondition(format!(
                    "highest bid {top_price} exceeds the buy-it-now offer {offer}"
                )));
            }
        }
        if self
            .store
            .find(tables::TRADERS, &[buyer_id.as_str()])?
            .is_none()
        {
            return Err(LedgerError::not_found(format!(
                "buyer {buyer_id} is not registered"
            )));
        }

        let mut auction = load_auction(self.store, &auction_id)?;
        if auction.status != AuctionStatus::Open {
            return Err(LedgerError::precondition(format!(
                "auction {auction_id} is not open (status {})",
                auction.status
            )));
        }
        if item_id != auction.item_id {
            return Err(LedgerError::validation(format!(
                "offer item {item_id} does not match auction item {}",
                auction.item_id
            )));
        }

        auction.status = AuctionStatus::Closed;
        self.store
            .replace(tables::AUCTIONS, &[auction_id.as_str()], auction.to_bytes()?)?;
        self.store
            .delete(tables::AUCTIONS_OPEN, &[BUCKET_PARTITION, auction_id.as_str()])?;

        let sale = Sale {
            auction_id: auction.auction_id.clone(),
            item_id: auction.item_id.clone(),
            kind: SaleKind::BuyNow,
            buyer_id,
            trans_date: self.ctx.business_time(),
            hammer_time: self.ctx.business_time(),
            hammer_price: offer_price,
            details: "buy-it-now".into(),
        };
        self.store.insert(
            tables::SALES,
            &[sale.auction_id.as_str(), sale.item_id.as_str()],
            sale.to_bytes()?,
        )?;
        Ok(sale)
    }
}

fn upsert<S: WorldState>(
    store: &mut TableStore<S>,
    table: &str,
    key: &[&str],
    payload: Vec<u8>,
) -> LedgerResult<()> {
    if store.find(table, key)?.is_some() {
        store.replace(table, key, payload)
    } else {
        store.insert(table, key, payload)
    }
}

/// Load a trader by id.
pub fn load_trader<S: WorldState>(
    store: &TableStore<S>,
    trader_id: &TraderId,
) -> LedgerResult<Trader> {
    let bytes = store.get_exact(tables::TRADERS, &[trader_id.as_str()])?;
    Trader::from_bytes(&bytes)
}

/// Load an item by id.
pub fn load_item<S: WorldState>(store: &TableStore<S>, item_id: &ItemId) -> LedgerResult<Item> {
    let bytes = store.get_exact(tables::ITEMS, &[item_id.as_str()])?;
    Item::from_bytes(&bytes)
}

/// Load an auction request by id.
pub fn load_auction<S: WorldState>(
    store: &TableStore<S>,
    auction_id: &AuctionId,
) -> LedgerResult<AuctionRequest> {
    let bytes = store.get_exact(tables::AUCTIONS, &[auction_id.as_str()])?;
    AuctionRequest::from_bytes(&bytes)
}

/// Load a single bid by `(auction id, bid no)`.
pub fn load_bid<S: WorldState>(
    store: &TableStore<S>,
    auction_id: &AuctionId,
    bid_no: &str,
) -> LedgerResult<Bid> {
    let bytes = store.get_exact(tables::BIDS, &[auction_id.as_str(), bid_no])?;
    Bid::from_bytes(&bytes)
}

/// Every bid of one auction, in store-native order.
pub fn bids_for<S: WorldState>(
    store: &TableStore<S>,
    auction_id: &AuctionId,
) -> LedgerResult<Vec<Bid>> {
    store
        .query_by_prefix(tables::BIDS, &[auction_id.as_str()])?
        .iter()
        .map(|row| Bid::from_bytes(&row.payload))
        .collect()
}

/// Number of bids received for an auction.
pub fn bid_count<S: WorldState>(
    store: &TableStore<S>,
    auction_id: &AuctionId,
) -> LedgerResult<usize> {
    Ok(store
        .query_by_prefix(tables::BIDS, &[auction_id.as_str()])?
        .len())
}

/// Highest bid for an auction; `None` when no bids exist.
///
/// The reduce is deterministic regardless of scan order: maximum price,
/// ties broken by the highest bid number.
pub fn highest_bid<S: WorldState>(
    store: &TableStore<S>,
    auction_id: &AuctionId,
) -> LedgerResult<Option<Bid>> {
    let mut best: Option<(i64, i64, Bid)> = None;
    for bid in bids_for(store, auction_id)? {
        let price = fields::parse_int("bid price", &bid.bid_price)?;
        let no = fields::parse_int("bid no", &bid.bid_no)?;
        let better = match &best {
            None => true,
            Some((top_price, top_no, _)) => {
                price > *top_price || (price == *top_price && no > *top_no)
            }
        };
        if better {
            best = Some((price, no, bid));
        }
    }
    Ok(best.map(|(_, _, bid)| bid))
}

/// Most recently received bid; ties on time broken by bid number.
pub fn last_bid<S: WorldState>(
    store: &TableStore<S>,
    auction_id: &AuctionId,
) -> LedgerResult<Option<Bid>> {
    let mut latest: Option<(chrono::NaiveDateTime, i64, Bid)> = None;
    for bid in bids_for(store, auction_id)? {
        let received = fields::parse_business_time("bid time", &bid.bid_time)?;
        let no = fields::parse_int("bid no", &bid.bid_no)?;
        let newer = match &latest {
            None => true,
            Some((top_time, top_no, _)) => {
                received > *top_time || (received == *top_time && no > *top_no)
            }
        };
        if newer {
            latest = Some((received, no, bid));
        }
    }
    Ok(latest.map(|(_, _, bid)| bid))
}

/// Traders in one category, via the category projection.
pub fn traders_by_category<S: WorldState>(
    store: &TableStore<S>,
    user_type: &str,
) -> LedgerResult<Vec<Trader>> {
    store
        .query_by_prefix(tables::TRADERS_BY_CATEGORY, &[BUCKET_PARTITION, user_type])?
        .iter()
        .map(|row| Trader::from_bytes(&row.payload))
        .collect()
}

/// Auctions still awaiting opening, via the INIT bucket.
pub fn init_auctions<S: WorldState>(store: &TableStore<S>) -> LedgerResult<Vec<AuctionRequest>> {
    store
        .query_by_prefix(tables::AUCTIONS_INIT, &[BUCKET_PARTITION])?
        .iter()
        .map(|row| AuctionRequest::from_bytes(&row.payload))
        .collect()
}

/// Auctions currently accepting bids, via the OPEN bucket.
pub fn open_auctions<S: WorldState>(store: &TableStore<S>) -> LedgerResult<Vec<AuctionRequest>> {
    store
        .query_by_prefix(tables::AUCTIONS_OPEN, &[BUCKET_PARTITION])?
        .iter()
        .map(|row| AuctionRequest::from_bytes(&row.payload))
        .collect()
}
