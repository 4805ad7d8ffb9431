///////////////////////////////////////////////////////////////////////
// Tags
///////////////////////////////////////////////////////////////////////

table! {
    tags (rowid) {
        rowid -> BigInt,
        name -> Text,
        #[sql_name = "count"]
        tag_count -> BigInt,
        fetched_at -> BigInt,
    }
}
