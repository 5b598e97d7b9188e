// Hand-maintained to match the tables created in `DieselDbContext::init_schema`.

diesel::table! {
    art_periods (id) {
        id -> Text,
        name -> Text,
        start_year -> Integer,
        end_year -> Integer,
        color -> Text,
        description -> Text,
        image_url -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    artworks (id) {
        id -> Text,
        title -> Text,
        artist -> Text,
        year -> Integer,
        image_url -> Text,
        description -> Text,
        period_id -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    extraction_history (id) {
        id -> Integer,
        filename -> Text,
        created_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(art_periods, artworks, extraction_history,);
