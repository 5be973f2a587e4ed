use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "google_play_transaction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub package_name: String,
    pub product_id: String,
    #[sea_orm(column_type = "Text")]
    pub purchase_token: String,
    pub start_time_millis: Option<String>,
    pub expiry_time_millis: Option<String>,
    pub auto_renewing: Option<String>,
    pub price_currency_code: Option<String>,
    pub price_amount_micros: Option<String>,
    pub country_code: Option<String>,
    pub developer_payload: Option<String>,
    pub cancel_reason: Option<String>,
    pub user_cancellation_time_millis: Option<String>,
    pub order_id: Option<String>,
    pub purchase_type: Option<String>,
    pub acknowledgement_state: Option<String>,
    pub kind: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
