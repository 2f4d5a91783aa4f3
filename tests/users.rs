use usher::models::ProfileRow;
use usher::search::users::{classify_match, hit_for, rank_profiles, MatchField};
use uuid::Uuid;

fn profile(
    full_name: Option<&str>,
    username: Option<&str>,
    email: Option<&str>,
    artist: Option<&str>,
    org: Option<&str>,
) -> ProfileRow {
    ProfileRow {
        id: Uuid::new_v4(),
        full_name: full_name.map(String::from),
        username: username.map(String::from),
        email: email.map(String::from),
        artist_name: artist.map(String::from),
        organization_name: org.map(String::from),
    }
}

#[test]
fn test_classify_prefers_name_over_other_fields() {
    // "rob" appears in the name, the handle, and the email; name wins
    let row = profile(Some("Rob Halford"), Some("rob77"), Some("rob@example.com"), None, None);
    assert_eq!(classify_match(&row, "rob"), Some(MatchField::FullName));
}

#[test]
fn test_classify_falls_through_the_priority_chain() {
    let row = profile(Some("Ana Lima"), Some("metalfan"), Some("ana@example.com"), None, None);
    assert_eq!(classify_match(&row, "metal"), Some(MatchField::Username));

    let row = profile(Some("Ana Lima"), Some("ana77"), Some("bookings@example.com"), None, None);
    assert_eq!(classify_match(&row, "bookings"), Some(MatchField::Email));

    let row = profile(Some("Ana Lima"), None, None, Some("The Hollow Suns"), None);
    assert_eq!(classify_match(&row, "hollow"), Some(MatchField::Artist));

    let row = profile(Some("Ana Lima"), None, None, None, Some("Northside Presents"));
    assert_eq!(classify_match(&row, "northside"), Some(MatchField::Organization));
}

#[test]
fn test_classify_is_case_insensitive() {
    let row = profile(Some("Rob Halford"), None, None, None, None);
    assert_eq!(classify_match(&row, "HALFORD"), Some(MatchField::FullName));
}

#[test]
fn test_classify_returns_none_without_a_match() {
    let row = profile(Some("Rob Halford"), Some("rob77"), None, None, None);
    assert_eq!(classify_match(&row, "zzz"), None);
}

#[test]
fn test_ranking_orders_by_matched_field() {
    // Backend returns these alphabetically; ranking must put the name
    // match first, then handle, then email, then artist, then org
    let by_org = profile(Some("Aaron Org"), None, None, None, Some("Marble Hall"));
    let by_name = profile(Some("Marble Marsh"), None, None, None, None);
    let by_email = profile(Some("Nina Ek"), None, Some("marble@example.com"), None, None);
    let by_artist = profile(Some("Pat Doyle"), None, None, Some("Marble Eyes"), None);
    let by_handle = profile(Some("Zoe Park"), Some("marblezoe"), None, None, None);

    let rows = vec![
        by_org.clone(),
        by_name.clone(),
        by_email.clone(),
        by_artist.clone(),
        by_handle.clone(),
    ];
    let hits = rank_profiles(rows, "marble");
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].id, by_name.id);
    assert_eq!(hits[1].id, by_handle.id);
    assert_eq!(hits[2].id, by_email.id);
    assert_eq!(hits[3].id, by_artist.id);
    assert_eq!(hits[4].id, by_org.id);
}

#[test]
fn test_ranking_keeps_backend_order_for_ties() {
    let first = profile(Some("Marble One"), None, None, None, None);
    let second = profile(Some("Marble Two"), None, None, None, None);

    let hits = rank_profiles(vec![first.clone(), second.clone()], "marble");
    assert_eq!(hits[0].id, first.id);
    assert_eq!(hits[1].id, second.id);
}

#[test]
fn test_indirect_matches_explain_themselves() {
    let row = profile(Some("Pat Doyle"), None, None, Some("Marble Eyes"), None);
    let hit = hit_for(&row, classify_match(&row, "marble"));
    assert_eq!(hit.label, "Pat Doyle");
    assert_eq!(hit.sublabel.as_deref(), Some("artist: Marble Eyes"));

    let row = profile(Some("Zoe Park"), Some("marblezoe"), None, None, None);
    let hit = hit_for(&row, classify_match(&row, "marble"));
    assert_eq!(hit.sublabel.as_deref(), Some("@marblezoe"));
}

#[test]
fn test_label_falls_back_when_name_is_missing() {
    let row = profile(None, Some("ghost"), Some("ghost@example.com"), None, None);
    let hit = hit_for(&row, None);
    assert_eq!(hit.label, "ghost");

    let row = profile(None, None, Some("ghost@example.com"), None, None);
    let hit = hit_for(&row, None);
    assert_eq!(hit.label, "ghost@example.com");
}
