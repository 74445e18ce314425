//! SeaORM entities for the scheduling tables.
//!
//! `appointments` is owned by this module. `beauticians` and `services` are
//! owned by the personnel and catalog services; the read-only adapters here
//! query them for the embedded deployment.

pub mod appointment {
    use anyhow::Context;
    use sea_orm::entity::prelude::*;
    use sea_orm::Set;

    use crate::contract::model::{Appointment, AppointmentStatus};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "appointments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub client_id: Uuid,
        pub service_id: Uuid,
        pub beautician_id: Uuid,
        pub date: Date,
        pub time_slot: String,
        pub duration_minutes: i32,
        pub price: Decimal,
        pub status: String,
        pub notes: Option<String>,
        pub client_notes: Option<String>,
        pub reminder_sent: bool,
        pub created_at: DateTime,
        pub updated_at: DateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl Model {
        pub fn into_domain(self) -> anyhow::Result<Appointment> {
            Ok(Appointment {
                id: self.id,
                client_id: self.client_id,
                service_id: self.service_id,
                beautician_id: self.beautician_id,
                date: self.date,
                time_slot: self
                    .time_slot
                    .parse()
                    .with_context(|| format!("stored time_slot '{}' is invalid", self.time_slot))?,
                duration_minutes: self
                    .duration_minutes
                    .try_into()
                    .context("stored duration is out of range")?,
                price: self.price,
                status: self
                    .status
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))
                    .context("stored status is invalid")?,
                notes: self.notes,
                client_notes: self.client_notes,
                reminder_sent: self.reminder_sent,
                created_at: self.created_at,
                updated_at: self.updated_at,
            })
        }
    }

    pub fn from_domain(appointment: &Appointment) -> ActiveModel {
        ActiveModel {
            id: Set(appointment.id),
            client_id: Set(appointment.client_id),
            service_id: Set(appointment.service_id),
            beautician_id: Set(appointment.beautician_id),
            date: Set(appointment.date),
            time_slot: Set(appointment.time_slot.to_string()),
            duration_minutes: Set(appointment.duration_minutes.into()),
            price: Set(appointment.price),
            status: Set(appointment.status.as_str().to_owned()),
            notes: Set(appointment.notes.clone()),
            client_notes: Set(appointment.client_notes.clone()),
            reminder_sent: Set(appointment.reminder_sent),
            created_at: Set(appointment.created_at),
            updated_at: Set(appointment.updated_at),
        }
    }

    /// Statuses that occupy a slot, as stored in the `status` column.
    pub fn active_statuses() -> [&'static str; 2] {
        [
            AppointmentStatus::Pending.as_str(),
            AppointmentStatus::Confirmed.as_str(),
        ]
    }
}

pub mod beautician {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "beauticians")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub active: bool,
        /// Per-weekday schedule as JSON; `NULL` means "use the configured
        /// default week".
        pub working_hours: Option<Json>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod offering {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "services")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub duration_minutes: i32,
        pub price: Decimal,
        pub active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
