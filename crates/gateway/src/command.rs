//! Closed enumeration of the mutating invocation surface.
//!
//! The host hands every invocation over as `(function name, positional
//! string args)`. Parsing maps that wire shape onto one typed variant —
//! a match arm per command, so an unknown or miscounted invocation is a
//! `Validation` failure here instead of a silent no-op further down.
//! Several commands carry a fixed record-kind tag in the historical wire
//! layout; the tag slot is kept and verified.

use tradeledger_auction::request::{AuctionRequest, AuctionStatus};
use tradeledger_auction::{Item, Trader};
use tradeledger_core::{
    AssetId, AuctionId, DocumentId, InvoiceId, ItemId, LedgerError, LedgerResult, OrderId,
    Record, TraderId, VoucherId, fields,
};
use tradeledger_dispatch::{Asset, OrderDetails, Stage};

/// One mutating invocation, fully typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateDispatchOrder {
        order_id: OrderId,
        details: OrderDetails,
    },
    UpdateDispatchOrder {
        order_id: OrderId,
        stage: Stage,
        details: OrderDetails,
    },
    CreateAsset {
        asset: Asset,
    },
    MapAsset {
        order_id: OrderId,
        asset_ids: String,
    },
    CreateDocument {
        document_id: DocumentId,
        document_name: String,
        document_type: String,
        document_string: String,
    },
    CreateVoucher {
        order_id: OrderId,
        details: OrderDetails,
    },
    UpdateVoucher {
        voucher_id: VoucherId,
        order_id: OrderId,
        details: OrderDetails,
        amount: String,
    },
    CreateInvoice {
        invoice_id: InvoiceId,
        voucher_ids: String,
    },
    ValidateInvoice {
        invoice_id: InvoiceId,
    },
    PostUser {
        trader: Trader,
    },
    PostItem {
        item: Item,
    },
    PostAuctionRequest {
        request: AuctionRequest,
    },
    OpenAuctionForBids {
        auction_id: AuctionId,
        duration_minutes: i64,
    },
    PlaceBid {
        auction_id: AuctionId,
        bid_no: String,
        item_id: ItemId,
        buyer_id: TraderId,
        bid_price: String,
    },
    CloseAuction {
        auction_id: AuctionId,
    },
    BuyItNow {
        auction_id: AuctionId,
        item_id: ItemId,
        buyer_id: TraderId,
        offer_price: String,
    },
}

impl Command {
    /// Parse a `(function, positional args)` invocation. Argument counts
    /// are fixed per command; a wrong count or unknown name is a hard
    /// `Validation` failure.
    pub fn parse(function: &str, args: &[String]) -> LedgerResult<Self> {
        match function {
            "createDispatchOrder" => {
                expect_args(function, args, 31)?;
                Ok(Command::CreateDispatchOrder {
                    order_id: OrderId::new(args[0].as_str())?,
                    details: details_from(&args[2..31]),
                })
            }
            "updateDispatchOrder" => {
                expect_args(function, args, 31)?;
                Ok(Command::UpdateDispatchOrder {
                    order_id: OrderId::new(args[0].as_str())?,
                    stage: Stage::try_from(args[1].clone())?,
                    details: details_from(&args[2..31]),
                })
            }
            "createAsset" => {
                expect_args(function, args, 10)?;
                Ok(Command::CreateAsset {
                    asset: Asset {
                        asset_id: AssetId::new(args[0].as_str())?,
                        part_number: args[1].clone(),
                        part_description: args[2].clone(),
                        owner: args[3].clone(),
                        stage: args[4].clone(),
                        batch_number: args[5].clone(),
                        manufacture_date: args[6].clone(),
                        itchs: args[7].clone(),
                        excise_chapter_number: args[8].clone(),
                        order_id: args[9].clone(),
                    },
                })
            }
            "mapAsset" => {
                expect_args(function, args, 2)?;
                Ok(Command::MapAsset {
                    order_id: OrderId::new(args[0].as_str())?,
                    asset_ids: args[1].clone(),
                })
            }
            "createDocument" => {
                expect_args(function, args, 4)?;
                Ok(Command::CreateDocument {
                    document_id: DocumentId::new(args[0].as_str())?,
                    document_name: args[1].clone(),
                    document_type: args[2].clone(),
                    document_string: args[3].clone(),
                })
            }
            "createVoucher" => {
                expect_args(function, args, 31)?;
                Ok(Command::CreateVoucher {
                    order_id: OrderId::new(args[0].as_str())?,
                    details: details_from(&args[2..31]),
                })
            }
            "updateVoucher" => {
                expect_args(function, args, 34)?;
                Ok(Command::UpdateVoucher {
                    voucher_id: VoucherId::new(args[0].as_str())?,
                    order_id: OrderId::new(args[1].as_str())?,
                    // args[2] is the stage slot and args[32] the timestamp
                    // slot; both are reassigned by the service.
                    details: details_from(&args[3..32]),
                    amount: args[33].clone(),
                })
            }
            "createInvoice" => {
                expect_args(function, args, 2)?;
                Ok(Command::CreateInvoice {
                    invoice_id: InvoiceId::new(args[0].as_str())?,
                    voucher_ids: args[1].clone(),
                })
            }
            "validateInvoice" => {
                expect_args(function, args, 1)?;
                Ok(Command::ValidateInvoice {
                    invoice_id: InvoiceId::new(args[0].as_str())?,
                })
            }
            "postUser" => {
                expect_args(function, args, 10)?;
                expect_tag(function, &args[1], Trader::KIND)?;
                Ok(Command::PostUser {
                    trader: Trader {
                        user_id: TraderId::new(args[0].as_str())?,
                        name: args[2].clone(),
                        user_type: args[3].clone(),
                        address: args[4].clone(),
                        phone: args[5].clone(),
                        email: args[6].clone(),
                        bank: args[7].clone(),
                        account_no: args[8].clone(),
                        routing_no: args[9].clone(),
                    },
                })
            }
            "postItem" => {
                expect_args(function, args, 6)?;
                expect_tag(function, &args[1], Item::KIND)?;
                Ok(Command::PostItem {
                    item: Item {
                        item_id: ItemId::new(args[0].as_str())?,
                        item_desc: args[2].clone(),
                        item_detail: args[3].clone(),
                        item_type: args[4].clone(),
                        item_subject: args[5].clone(),
                    },
                })
            }
            "postAuctionRequest" => {
                expect_args(function, args, 8)?;
                expect_tag(function, &args[1], AuctionRequest::KIND)?;
                Ok(Command::PostAuctionRequest {
                    request: AuctionRequest {
                        auction_id: AuctionId::new(args[0].as_str())?,
                        item_id: ItemId::new(args[2].as_str())?,
                        auction_house_id: TraderId::new(args[3].as_str())?,
                        request_date: args[4].clone(),
                        reserve_price: args[5].clone(),
                        status: AuctionStatus::Init,
                        // Placeholders until the INIT → OPEN transition.
                        open_date: args[6].clone(),
                        close_date: args[7].clone(),
                    },
                })
            }
            "openAuctionForBids" => {
                expect_args(function, args, 3)?;
                expect_tag(function, &args[1], "OPENAUC")?;
                Ok(Command::OpenAuctionForBids {
                    auction_id: AuctionId::new(args[0].as_str())?,
                    duration_minutes: fields::parse_int("auction duration", &args[2])?,
                })
            }
            "placeBid" => {
                expect_args(function, args, 6)?;
                expect_tag(function, &args[1], "BID")?;
                Ok(Command::PlaceBid {
                    auction_id: AuctionId::new(args[0].as_str())?,
                    bid_no: args[2].clone(),
                    item_id: ItemId::new(args[3].as_str())?,
                    buyer_id: TraderId::new(args[4].as_str())?,
                    bid_price: args[5].clone(),
                })
            }
            "closeAuction" => {
                expect_args(function, args, 2)?;
                expect_tag(function, &args[1], AuctionRequest::KIND)?;
                Ok(Command::CloseAuction {
                    auction_id: AuctionId::new(args[0].as_str())?,
                })
            }
            "buyItNow" => {
                // Historical wire layout is bid-shaped; trailing args are
                // tolerated but unused.
                if args.len() < 6 {
                    return Err(LedgerError::validation(format!(
                        "{function} expects at least 6 args, got {}",
                        args.len()
                    )));
                }
                expect_tag(function, &args[1], "BID")?;
                Ok(Command::BuyItNow {
                    auction_id: AuctionId::new(args[0].as_str())?,
                    item_id: ItemId::new(args[3].as_str())?,
                    buyer_id: TraderId::new(args[4].as_str())?,
                    offer_price: args[5].clone(),
                })
            }
            other => Err(LedgerError::validation(format!(
                "unknown invocation {other:?}"
            ))),
        }
    }

    /// Wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateDispatchOrder { .. } => "createDispatchOrder",
            Command::UpdateDispatchOrder { .. } => "updateDispatchOrder",
            Command::CreateAsset { .. } => "createAsset",
            Command::MapAsset { .. } => "mapAsset",
            Command::CreateDocument { .. } => "createDocument",
            Command::CreateVoucher { .. } => "createVoucher",
            Command::UpdateVoucher { .. } => "updateVoucher",
            Command::CreateInvoice { .. } => "createInvoice",
            Command::ValidateInvoice { .. } => "validateInvoice",
            Command::PostUser { .. } => "postUser",
            Command::PostItem { .. } => "postItem",
            Command::PostAuctionRequest { .. } => "postAuctionRequest",
            Command::OpenAuctionForBids { .. } => "openAuctionForBids",
            Command::PlaceBid { .. } => "placeBid",
            Command::CloseAuction { .. } => "closeAuction",
            Command::BuyItNow { .. } => "buyItNow",
        }
    }
}

fn expect_args(function: &str, args: &[String], want: usize) -> LedgerResult<()> {
    if args.len() != want {
        return Err(LedgerError::validation(format!(
            "{function} expects {want} args, got {}",
            args.len()
        )));
    }
    Ok(())
}

fn expect_tag(function: &str, got: &str, want: &str) -> LedgerResult<()> {
    if got != want {
        return Err(LedgerError::validation(format!(
            "{function} expects record kind {want}, got {got:?}"
        )));
    }
    Ok(())
}

/// Map a 29-slot positional window onto the shared detail block.
fn details_from(window: &[String]) -> OrderDetails {
    OrderDetails {
        customer: window[0].clone(),
        transporter: window[1].clone(),
        seller: window[2].clone(),
        asset_ids: window[3].clone(),
        asn_number: window[4].clone(),
        source: window[5].clone(),
        shipment_type: window[6].clone(),
        contract_type: window[7].clone(),
        delivery_term: window[8].clone(),
        dispatch_date: window[9].clone(),
        transporter_ref: window[10].clone(),
        loading_type: window[11].clone(),
        vehicle_type: window[12].clone(),
        weight: window[13].clone(),
        consignment: window[14].clone(),
        quantity: window[15].clone(),
        part_number: window[16].clone(),
        part_name: window[17].clone(),
        order_ref_num: window[18].clone(),
        created_on: window[19].clone(),
        document_id1: window[20].clone(),
        document_id2: window[21].clone(),
        document_id3: window[22].clone(),
        document_id4: window[23].clone(),
        drop_description: window[24].clone(),
        delivery_description: window[25].clone(),
        in_transit_dispatch_officer_signed: window[26].clone(),
        in_transit_transporter_signed: window[27].clone(),
        transaction_description: window[28].clone(),
    }
}
