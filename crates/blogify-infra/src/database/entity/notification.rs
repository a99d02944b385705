//! Notification entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blogify_core::domain::NotificationKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: Kind,
    pub message: String,
    pub link: String,
    pub is_read: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Stored form of [`NotificationKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Kind {
    #[sea_orm(string_value = "comment")]
    Comment,
    #[sea_orm(string_value = "like")]
    Like,
}

impl From<Kind> for NotificationKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Comment => NotificationKind::Comment,
            Kind::Like => NotificationKind::Like,
        }
    }
}

impl From<NotificationKind> for Kind {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Comment => Kind::Comment,
            NotificationKind::Like => Kind::Like,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for blogify_core::domain::Notification {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            kind: model.kind.into(),
            message: model.message,
            link: model.link,
            is_read: model.is_read,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<blogify_core::domain::Notification> for ActiveModel {
    fn from(note: blogify_core::domain::Notification) -> Self {
        Self {
            id: Set(note.id),
            user_id: Set(note.user_id),
            kind: Set(note.kind.into()),
            message: Set(note.message),
            link: Set(note.link),
            is_read: Set(note.is_read),
            created_at: Set(note.created_at.into()),
            updated_at: Set(note.updated_at.into()),
        }
    }
}
