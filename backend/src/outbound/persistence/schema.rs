//! Diesel table definitions for the marketplace schema.
//!
//! Kept in step with `backend/migrations` by hand.

diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        contact_number -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    listings (id) {
        id -> Uuid,
        seq -> Int8,
        kind -> Text,
        title -> Text,
        description -> Nullable<Text>,
        contact_number -> Nullable<Text>,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        price -> Nullable<Float8>,
        images -> Array<Text>,
        deadline -> Nullable<Timestamptz>,
        payment -> Nullable<Float8>,
        fulfilled -> Bool,
        interested_user_ids -> Array<Uuid>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, listings);
