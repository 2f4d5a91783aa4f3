use rand::rngs::StdRng;
use rand::SeedableRng;
use usher::mock::{plan_orders, GenField, GenerationConfig};
use usher::models::TicketTierRow;
use uuid::Uuid;

fn tiers(event_id: Uuid) -> Vec<TicketTierRow> {
    vec![
        TicketTierRow {
            id: Uuid::new_v4(),
            event_id,
            name: "General".to_string(),
            price_in_cents: 2500,
        },
        TicketTierRow {
            id: Uuid::new_v4(),
            event_id,
            name: "VIP".to_string(),
            price_in_cents: 7500,
        },
    ]
}

fn config() -> GenerationConfig {
    GenerationConfig {
        order_count: 40,
        max_tickets_per_order: 4,
        rsvp_ratio: 0.5,
        free_ratio: 0.25,
    }
}

#[test]
fn test_config_validation_bounds() {
    assert!(config().validate().is_ok());

    let mut c = config();
    c.order_count = 0;
    let errors = c.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == GenField::Orders));

    let mut c = config();
    c.order_count = 501;
    assert!(c.validate().is_err());

    let mut c = config();
    c.max_tickets_per_order = 0;
    let errors = c.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == GenField::TicketsPerOrder));

    let mut c = config();
    c.rsvp_ratio = 1.01;
    let errors = c.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == GenField::RsvpRatio));

    let mut c = config();
    c.free_ratio = -0.5;
    let errors = c.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == GenField::FreeRatio));
}

#[test]
fn test_config_validation_reports_every_violation() {
    let c = GenerationConfig {
        order_count: 0,
        max_tickets_per_order: 99,
        rsvp_ratio: 2.0,
        free_ratio: 2.0,
    };
    let errors = c.validate().unwrap_err();
    assert_eq!(errors.len(), 4);
}

#[test]
fn test_plan_respects_order_count_and_ticket_bounds() {
    let event_id = Uuid::new_v4();
    let tiers = tiers(event_id);
    let mut rng = StdRng::seed_from_u64(7);

    let plan = plan_orders(event_id, &tiers, &config(), &mut rng).unwrap();
    assert_eq!(plan.event_id, event_id);
    assert_eq!(plan.orders.len(), 40);

    let tier_ids: Vec<Uuid> = tiers.iter().map(|t| t.id).collect();
    for order_plan in &plan.orders {
        let count = order_plan.tickets.len();
        assert!((1..=4).contains(&count));
        assert_eq!(order_plan.order.event_id, event_id);
        assert!(order_plan.order.is_mock);
        for ticket in &order_plan.tickets {
            assert_eq!(ticket.order_id, order_plan.order.id);
            assert!(tier_ids.contains(&ticket.tier_id));
        }
    }
}

#[test]
fn test_free_orders_zero_out_prices_and_totals() {
    let event_id = Uuid::new_v4();
    let tiers = tiers(event_id);
    let mut rng = StdRng::seed_from_u64(21);

    let plan = plan_orders(event_id, &tiers, &config(), &mut rng).unwrap();
    for order_plan in &plan.orders {
        let ticket_sum: i64 = order_plan.tickets.iter().map(|t| t.price_in_cents).sum();
        assert_eq!(order_plan.order.total_in_cents, ticket_sum);
        if order_plan.order.is_free {
            assert_eq!(ticket_sum, 0);
        } else {
            assert!(ticket_sum > 0);
        }
    }
}

#[test]
fn test_rsvp_count_follows_the_ratio() {
    let event_id = Uuid::new_v4();
    let tiers = tiers(event_id);
    let mut rng = StdRng::seed_from_u64(3);

    // 40 orders at 0.5 => exactly 20 RSVPs
    let plan = plan_orders(event_id, &tiers, &config(), &mut rng).unwrap();
    assert_eq!(plan.rsvps.len(), 20);
    for rsvp in &plan.rsvps {
        assert_eq!(rsvp.event_id, event_id);
        assert!(rsvp.is_mock);
        assert!(rsvp.email.contains('@'));
    }

    // Ratio of zero means no RSVP rows at all
    let mut c = config();
    c.rsvp_ratio = 0.0;
    let plan = plan_orders(event_id, &tiers, &c, &mut rng).unwrap();
    assert!(plan.rsvps.is_empty());
}

#[test]
fn test_plan_requires_tiers() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = plan_orders(Uuid::new_v4(), &[], &config(), &mut rng).unwrap_err();
    assert!(err.to_string().contains("no ticket tiers"));
}

#[test]
fn test_plan_rejects_invalid_config() {
    let event_id = Uuid::new_v4();
    let tiers = tiers(event_id);
    let mut rng = StdRng::seed_from_u64(1);
    let mut c = config();
    c.order_count = 0;
    assert!(plan_orders(event_id, &tiers, &c, &mut rng).is_err());
}

#[test]
fn test_same_seed_reproduces_the_plan() {
    let event_id = Uuid::new_v4();
    let tiers = tiers(event_id);

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let plan_a = plan_orders(event_id, &tiers, &config(), &mut rng_a).unwrap();
    let plan_b = plan_orders(event_id, &tiers, &config(), &mut rng_b).unwrap();

    let names_a: Vec<&str> = plan_a.orders.iter().map(|o| o.order.buyer_name.as_str()).collect();
    let names_b: Vec<&str> = plan_b.orders.iter().map(|o| o.order.buyer_name.as_str()).collect();
    assert_eq!(names_a, names_b);
}
