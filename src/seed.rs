//! Demo investigation used by the `seed` subcommand.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use tracing::info;

use crate::error::StorageResult;
use crate::storage::{
    Board, BoardMember, Comment, Connection, ConnectionType, EntityKind, Evidence, EvidenceLink,
    EvidenceRelation, EvidenceSourceType, MemberRole, Reliability, Storage, Thought, ThoughtStatus,
    ThoughtType,
};

/// ID of the demo board.
pub const DEMO_BOARD_ID: &str = "board-1";

fn jan_2024(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn member(user_id: &str, name: &str, avatar: &str, role: MemberRole) -> BoardMember {
    let mut member = BoardMember::new(user_id, name, role);
    member.avatar = Some(avatar.to_string());
    member
}

fn demo_board() -> Board {
    let mut board = Board::new("Acme Support Refund Investigation", "user-1")
        .with_id(DEMO_BOARD_ID)
        .with_member(member("user-1", "Sarah Chen", "SC", MemberRole::Lead))
        .with_member(member("user-2", "Mike Rodriguez", "MR", MemberRole::Editor));
    board.created_at = jan_2024(15, 0, 0);
    board
}

fn demo_thoughts() -> Vec<Thought> {
    let dated = |mut t: Thought, created: u32, updated: u32| {
        t.created_at = jan_2024(created, 0, 0);
        t.updated_at = jan_2024(updated, 0, 0);
        t
    };

    vec![
        dated(
            Thought::new(DEMO_BOARD_ID, ThoughtType::Question, "Is acme-support-refund.com a scam site?")
                .with_id("thought-1")
                .with_body("Domain reported by multiple users claiming to be official Acme support. Requesting payment for \"refund processing fees\".")
                .with_status(ThoughtStatus::Investigating)
                .with_tags(["scam", "phishing", "domain"])
                .with_owner("user-1")
                .with_created_by("user-1")
                .with_position(100.0, 100.0),
            15,
            15,
        ),
        dated(
            Thought::new(DEMO_BOARD_ID, ThoughtType::Hypothesis, "Brand impersonation for refund scam")
                .with_id("thought-2")
                .with_body("Site appears to be impersonating Acme Corp to collect fraudulent \"processing fees\" from victims expecting refunds.")
                .with_confidence(75)
                .with_status(ThoughtStatus::Investigating)
                .with_tags(["impersonation", "fraud"])
                .with_owner("user-1")
                .with_created_by("user-1")
                .with_position(400.0, 100.0),
            16,
            18,
        ),
        dated(
            Thought::new(DEMO_BOARD_ID, ThoughtType::Claim, "Domain linked to prior case by phone reuse")
                .with_id("thought-3")
                .with_body("Phone number +1-555-0123 found on site matches number from Case #2847 (confirmed scam operation).")
                .with_confidence(85)
                .with_status(ThoughtStatus::Supported)
                .with_tags(["attribution", "phone", "link-analysis"])
                .with_owner("user-2")
                .with_created_by("user-2")
                .with_position(700.0, 100.0),
            17,
            19,
        ),
        dated(
            Thought::new(DEMO_BOARD_ID, ThoughtType::Observation, "Site uses shared hosting infrastructure")
                .with_id("thought-4")
                .with_body("Domain resolves to 192.168.1.100 which hosts 200+ other domains. Hosting provider is BudgetHost LLC.")
                .with_tags(["infrastructure", "hosting"])
                .with_created_by("user-2")
                .with_position(400.0, 350.0),
            18,
            18,
        ),
    ]
}

fn demo_evidence() -> Vec<Evidence> {
    let dated = |mut e: Evidence, day: u32| {
        e.timestamp = jan_2024(day, 0, 0);
        e.created_at = e.timestamp;
        e
    };

    vec![
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::Url, "Screenshot of fraudulent site")
                .with_id("evidence-1")
                .with_summary("Screenshot showing acme-support-refund.com homepage with fake Acme branding")
                .with_reliability(Reliability::High)
                .with_entity(EntityKind::Domain, "acme-support-refund.com")
                .with_raw_payload(json!({
                    "url": "https://acme-support-refund.com",
                    "captured_at": "2024-01-15"
                }))
                .with_created_by("user-1"),
            15,
        ),
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::Note, "User report from victim")
                .with_id("evidence-2")
                .with_summary("Received email claiming to be from Acme support. Asked for $50 processing fee to release $500 refund. Site looks legitimate but domain is suspicious.")
                .with_reliability(Reliability::Medium)
                .with_created_by("user-1"),
            15,
        ),
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::Profiler, "Domain WHOIS lookup")
                .with_id("evidence-3")
                .with_summary("WHOIS data shows recent registration with privacy protection")
                .with_reliability(Reliability::High)
                .with_entity(EntityKind::Domain, "acme-support-refund.com")
                .with_raw_payload(json!({
                    "registrar": "NameCheap",
                    "registration_date": "2024-01-10",
                    "registrant": "Privacy Protected",
                    "nameservers": ["ns1.budgethost.com", "ns2.budgethost.com"]
                }))
                .with_created_by("user-1"),
            16,
        ),
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::Url, "Payment flow screenshot")
                .with_id("evidence-4")
                .with_summary("Site requests payment via untraceable gift cards")
                .with_reliability(Reliability::High)
                .with_raw_payload(json!({
                    "description": "Site requests payment via untraceable gift cards",
                    "payment_methods": ["Amazon Gift Card", "iTunes Gift Card"]
                }))
                .with_created_by("user-1"),
            16,
        ),
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::CaseArtifact, "Phone number match from Case #2847")
                .with_id("evidence-5")
                .with_summary("Phone number +1-555-0123 appears in previous confirmed scam case")
                .with_reliability(Reliability::High)
                .with_entity(EntityKind::Phone, "+1-555-0123")
                .with_raw_payload(json!({
                    "case_id": "2847",
                    "phone_number": "+1-555-0123",
                    "status": "Confirmed Scam",
                    "date_reported": "2023-11-20"
                }))
                .with_created_by("user-2"),
            17,
        ),
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::Note, "Shared hosting weakens attribution")
                .with_id("evidence-6")
                .with_summary("IP address hosts 200+ domains. Cannot definitively attribute to same actor without additional evidence. Shared hosting is common for budget operations.")
                .with_reliability(Reliability::Medium)
                .with_entity(EntityKind::Ip, "192.168.1.100")
                .with_created_by("user-2"),
            18,
        ),
        dated(
            Evidence::new(DEMO_BOARD_ID, EvidenceSourceType::Profiler, "IP and hosting analysis")
                .with_id("evidence-7")
                .with_summary("IP 192.168.1.100 hosted by BudgetHost LLC with 247 co-hosted domains")
                .with_reliability(Reliability::High)
                .with_entity(EntityKind::Ip, "192.168.1.100")
                .with_raw_payload(json!({
                    "ip": "192.168.1.100",
                    "hosting_provider": "BudgetHost LLC",
                    "shared_hosting": true,
                    "cohosted_domains": 247,
                    "location": "United States"
                }))
                .with_created_by("user-2"),
            18,
        ),
    ]
}

fn demo_links() -> Vec<EvidenceLink> {
    let link = |id: &str, thought: &str, evidence: &str, relation, is_key, user: &str, day| {
        let mut link = EvidenceLink::new(thought, evidence, relation)
            .with_id(id)
            .with_key(is_key)
            .with_created_by(user);
        link.created_at = jan_2024(day, 0, 0);
        link
    };

    use EvidenceRelation::*;
    vec![
        link("link-1", "thought-1", "evidence-1", Context, false, "user-1", 15),
        link("link-2", "thought-1", "evidence-2", Supports, true, "user-1", 15),
        link("link-3", "thought-2", "evidence-3", Supports, true, "user-1", 16),
        link("link-4", "thought-2", "evidence-4", Supports, true, "user-1", 16),
        link("link-5", "thought-3", "evidence-5", Supports, true, "user-2", 17),
        link("link-6", "thought-3", "evidence-6", Contradicts, false, "user-2", 18),
        link("link-7", "thought-4", "evidence-7", Supports, false, "user-2", 18),
    ]
}

fn demo_connections() -> Vec<Connection> {
    vec![
        Connection::new(DEMO_BOARD_ID, "thought-1", "thought-2", ConnectionType::Related)
            .with_id("connection-1"),
        Connection::new(DEMO_BOARD_ID, "thought-2", "thought-3", ConnectionType::Supports)
            .with_id("connection-2"),
        Connection::new(DEMO_BOARD_ID, "thought-4", "thought-3", ConnectionType::Contradicts)
            .with_id("connection-3"),
    ]
}

fn demo_comments() -> Vec<Comment> {
    let mut gift_cards = Comment::new(
        DEMO_BOARD_ID,
        "thought-2",
        "user-2",
        "Mike Rodriguez",
        "The gift card payment method is a strong indicator. Legitimate businesses don't use this.",
    )
    .with_id("comment-1");
    gift_cards.created_at = jan_2024(16, 14, 30);

    let mut spoofing = Comment::new(
        DEMO_BOARD_ID,
        "thought-3",
        "user-1",
        "Sarah Chen",
        "Good catch on the phone number! However, we should verify if the number could have been spoofed or recycled.",
    )
    .with_id("comment-2");
    spoofing.created_at = jan_2024(17, 10, 15);
    spoofing.is_pinned = true;

    vec![gift_cards, spoofing]
}

/// Insert the demo investigation.
///
/// Returns `false` without writing anything when the demo board already exists.
pub async fn seed_demo_board<S: Storage + ?Sized>(storage: &S) -> StorageResult<bool> {
    if storage.get_board(DEMO_BOARD_ID).await?.is_some() {
        info!(board_id = DEMO_BOARD_ID, "Demo board already present, skipping seed");
        return Ok(false);
    }

    storage.create_board(&demo_board()).await?;
    for thought in demo_thoughts() {
        storage.create_thought(&thought).await?;
    }
    for evidence in demo_evidence() {
        storage.create_evidence(&evidence).await?;
    }
    for link in demo_links() {
        storage.create_evidence_link(&link).await?;
    }
    for connection in demo_connections() {
        storage.create_connection(&connection).await?;
    }
    for comment in demo_comments() {
        storage.create_comment(&comment).await?;
    }

    info!(board_id = DEMO_BOARD_ID, "Demo board seeded");
    Ok(true)
}
