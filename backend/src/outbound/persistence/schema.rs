//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` after changing migrations.

diesel::table! {
    /// Registered members.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Unique contact address.
        email -> Varchar,
        /// Free-form self description.
        bio -> Nullable<Text>,
        /// Free-form location string.
        location -> Nullable<Varchar>,
        /// Discovery visibility flag.
        profile_public -> Bool,
        /// Account enabled flag.
        active -> Bool,
        /// Contact address confirmed flag.
        email_verified -> Bool,
        /// Exchange schedule (`WEEKEND`, `WORKING`, `FLEXIBLE`).
        availability -> Varchar,
        /// Mean review score, externally maintained.
        average_rating -> Float8,
        /// Review count, externally maintained.
        total_reviews -> Int4,
        /// Completed exchange count, externally maintained.
        completed_swaps -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Deduplicated skill catalog.
    skills (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name as first entered.
        name -> Varchar,
        /// Lowercased name; carries the case-insensitive unique index.
        name_key -> Varchar,
        /// Grouping category.
        category -> Varchar,
        /// Optional longer description.
        description -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directional links between members and catalog skills.
    user_skills (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning member.
        user_id -> Uuid,
        /// Linked catalog skill.
        skill_id -> Uuid,
        /// Link direction (`OFFERED` or `WANTED`).
        direction -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Connection request ledger.
    connection_requests (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Initiating member.
        sender_id -> Uuid,
        /// Responding member.
        receiver_id -> Uuid,
        /// Optional greeting from the sender.
        message -> Nullable<Varchar>,
        /// Lifecycle state (`PENDING`, `ACCEPTED`, `DECLINED`, `CANCELLED`).
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Response timestamp, set exactly once on accept or decline.
        responded_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(user_skills -> skills (skill_id));
diesel::joinable!(user_skills -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, skills, user_skills, connection_requests);
