//! Mock order generation for live-event rehearsal.
//!
//! Front-of-house teams run this against a real event to fill it with fake
//! buyers, tickets, and RSVPs before doors open. The plan is synthesized
//! locally with `rand`, inserted through the data API one order at a time,
//! and reported as progress after every order. A remote failure stops the
//! run; rows already inserted stay and the bulk-delete RPC cleans them up.

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::constants::{
    GENERATION_MAX_ORDERS, GENERATION_MAX_TICKETS_PER_ORDER, GENERATION_MIN_ORDERS, GENERATION_SNAPSHOT_EVERY,
};
use crate::models::{NewOrder, NewRsvp, NewTicket, TicketTierRow};
use crate::store::LocalStore;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Carmen", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Iris", "Jonas", "Kira", "Luca", "Mara",
    "Nadia", "Omar", "Priya", "Quentin", "Rosa", "Stefan", "Tessa",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Becker", "Castro", "Dubois", "Eriksen", "Fontaine", "Gruber", "Haddad", "Ivanova", "Jensen", "Klein",
    "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov", "Quiroga", "Rossi", "Sato", "Tanaka",
];

/// Field a generation config error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenField {
    Orders,
    TicketsPerOrder,
    RsvpRatio,
    FreeRatio,
}

/// One config validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct GenFieldError {
    pub field: GenField,
    pub message: String,
}

impl GenFieldError {
    fn new(field: GenField, message: String) -> Self {
        Self { field, message }
    }
}

/// Knobs for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub order_count: u32,
    pub max_tickets_per_order: u32,
    pub rsvp_ratio: f64,
    pub free_ratio: f64,
}

impl GenerationConfig {
    /// Check every knob against its bounds, reporting all violations.
    pub fn validate(&self) -> std::result::Result<(), Vec<GenFieldError>> {
        let mut errors = Vec::new();

        if self.order_count < GENERATION_MIN_ORDERS || self.order_count > GENERATION_MAX_ORDERS {
            errors.push(GenFieldError::new(
                GenField::Orders,
                format!(
                    "Order count must be between {} and {}",
                    GENERATION_MIN_ORDERS, GENERATION_MAX_ORDERS
                ),
            ));
        }
        if self.max_tickets_per_order < 1 || self.max_tickets_per_order > GENERATION_MAX_TICKETS_PER_ORDER {
            errors.push(GenFieldError::new(
                GenField::TicketsPerOrder,
                format!(
                    "Tickets per order must be between 1 and {}",
                    GENERATION_MAX_TICKETS_PER_ORDER
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.rsvp_ratio) {
            errors.push(GenFieldError::new(
                GenField::RsvpRatio,
                "RSVP ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.free_ratio) {
            errors.push(GenFieldError::new(
                GenField::FreeRatio,
                "Free ratio must be between 0.0 and 1.0".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One planned order with its ticket rows.
#[derive(Debug, Clone)]
pub struct OrderPlan {
    pub order: NewOrder,
    pub tickets: Vec<NewTicket>,
}

/// Everything a run will insert, synthesized up front.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub event_id: Uuid,
    pub orders: Vec<OrderPlan>,
    pub rsvps: Vec<NewRsvp>,
}

/// Per-event progress snapshot, also persisted to the local store so a
/// reopened dialog can show where the last run got to. Never authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationProgress {
    pub event_id: Uuid,
    pub orders_total: u32,
    pub orders_done: u32,
    pub tickets_done: u32,
    pub rsvps_done: u32,
    pub finished: bool,
}

impl GenerationProgress {
    pub fn start(event_id: Uuid, orders_total: u32) -> Self {
        Self {
            event_id,
            orders_total,
            orders_done: 0,
            tickets_done: 0,
            rsvps_done: 0,
            finished: false,
        }
    }
}

/// Counts reported when a run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub orders: u32,
    pub tickets: u32,
    pub rsvps: u32,
}

fn fake_buyer(rng: &mut impl Rng) -> (String, String) {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    let name = format!("{} {}", first, last);
    let email = format!(
        "{}.{}{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(1..1000)
    );
    (name, email)
}

/// Synthesize a run: fake buyers, tickets spread over the event's real
/// tiers, a `free_ratio` share of zero-total orders, and
/// `rsvp_ratio * order_count` RSVP rows.
pub fn plan_orders(
    event_id: Uuid,
    tiers: &[TicketTierRow],
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<GenerationPlan> {
    if let Err(errors) = config.validate() {
        let first = errors.first().map(|e| e.message.clone()).unwrap_or_default();
        anyhow::bail!("invalid generation config: {}", first);
    }
    if tiers.is_empty() {
        anyhow::bail!("event has no ticket tiers to generate against");
    }

    let mut orders = Vec::with_capacity(config.order_count as usize);
    for _ in 0..config.order_count {
        let order_id = Uuid::new_v4();
        let (buyer_name, buyer_email) = fake_buyer(rng);
        let is_free = rng.gen_bool(config.free_ratio);

        let ticket_count = rng.gen_range(1..=config.max_tickets_per_order);
        let mut tickets = Vec::with_capacity(ticket_count as usize);
        let mut total_in_cents = 0;
        for _ in 0..ticket_count {
            let tier = tiers.choose(rng).ok_or_else(|| anyhow::anyhow!("tier list emptied"))?;
            let price_in_cents = if is_free { 0 } else { tier.price_in_cents };
            total_in_cents += price_in_cents;
            tickets.push(NewTicket {
                id: Uuid::new_v4(),
                order_id,
                event_id,
                tier_id: tier.id,
                price_in_cents,
            });
        }

        orders.push(OrderPlan {
            order: NewOrder {
                id: order_id,
                event_id,
                buyer_name,
                buyer_email,
                status: "paid".to_string(),
                is_mock: true,
                is_free,
                total_in_cents,
            },
            tickets,
        });
    }

    let rsvp_count = (f64::from(config.order_count) * config.rsvp_ratio).round() as u32;
    let mut rsvps = Vec::with_capacity(rsvp_count as usize);
    for _ in 0..rsvp_count {
        let (name, email) = fake_buyer(rng);
        rsvps.push(NewRsvp {
            id: Uuid::new_v4(),
            event_id,
            name,
            email,
            is_mock: true,
        });
    }

    Ok(GenerationPlan {
        event_id,
        orders,
        rsvps,
    })
}

/// Insert the plan, reporting after every order and checkpointing the
/// snapshot to the local store every few orders and at the end.
///
/// Store writes are best effort: a failed checkpoint is logged and the run
/// continues. A failed API insert ends the run with whatever was already
/// inserted left in place.
pub async fn run_generation<F>(
    api: &ApiClient,
    store: &LocalStore,
    plan: GenerationPlan,
    mut on_progress: F,
) -> std::result::Result<GenerationOutcome, ApiError>
where
    F: FnMut(&GenerationProgress),
{
    let mut progress = GenerationProgress::start(plan.event_id, plan.orders.len() as u32);

    for (index, order_plan) in plan.orders.iter().enumerate() {
        api.insert_many("orders", std::slice::from_ref(&order_plan.order)).await?;
        if !order_plan.tickets.is_empty() {
            api.insert_many("tickets", &order_plan.tickets).await?;
        }

        progress.orders_done += 1;
        progress.tickets_done += order_plan.tickets.len() as u32;
        on_progress(&progress);

        if (index as u32 + 1) % GENERATION_SNAPSHOT_EVERY == 0 {
            if let Err(e) = store.save_progress(&progress).await {
                log::warn!("progress checkpoint failed: {}", e);
            }
        }
    }

    if !plan.rsvps.is_empty() {
        api.insert_many("rsvps", &plan.rsvps).await?;
        progress.rsvps_done = plan.rsvps.len() as u32;
        on_progress(&progress);
    }

    progress.finished = true;
    on_progress(&progress);
    if let Err(e) = store.save_progress(&progress).await {
        log::warn!("final progress checkpoint failed: {}", e);
    }

    Ok(GenerationOutcome {
        orders: progress.orders_done,
        tickets: progress.tickets_done,
        rsvps: progress.rsvps_done,
    })
}
