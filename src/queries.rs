//! Fixed GraphQL query catalog. Filtering and ordering are baked into the
//! query text; the executor sends these verbatim.

pub const USER_INFO: &str = r#"
query GetUserInfo {
  user {
    id
    login
    firstName
    lastName
    email
    campus
    auditRatio
    totalUp
    totalDown
    createdAt
  }
}
"#;

pub const XP_TRANSACTIONS: &str = r#"
query GetUserXp {
  transaction(where: {type: {_eq: "xp"}}, order_by: {createdAt: asc}) {
    id
    amount
    createdAt
    path
    type
  }
}
"#;

pub const PROJECT_PROGRESS: &str = r#"
query GetUserProgress {
  progress(order_by: {createdAt: asc}) {
    id
    grade
    createdAt
    path
  }
}
"#;

pub const AUDIT_TRANSACTIONS: &str = r#"
query GetUserAudits {
  transaction(where: {type: {_in: ["up", "down"]}}) {
    id
    type
    amount
    createdAt
  }
}
"#;

pub const SKILL_TRANSACTIONS: &str = r#"
query GetUserSkills {
  transaction(where: {type: {_like: "skill%"}}, order_by: {createdAt: desc}) {
    id
    type
    amount
    createdAt
    path
  }
}
"#;

pub const EVENT_LEVELS: &str = r#"
query GetUserEventLevels {
  event_user(where: {eventId: {_in: [72, 20, 250]}}) {
    userId
    eventId
    level
  }
}
"#;
