use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Beauticians::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Beauticians::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Beauticians::Name).string().not_null())
                    .col(
                        ColumnDef::new(Beauticians::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Beauticians::WorkingHours).json().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::DurationMinutes).integer().not_null())
                    .col(ColumnDef::new(Services::Price).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Services::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Appointments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Appointments::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::BeauticianId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::Date).date().not_null())
                    .col(ColumnDef::new(Appointments::TimeSlot).string_len(5).not_null())
                    .col(
                        ColumnDef::new(Appointments::DurationMinutes)
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(ColumnDef::new(Appointments::Price).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Appointments::Notes).string_len(500).null())
                    .col(ColumnDef::new(Appointments::ClientNotes).string_len(500).null())
                    .col(
                        ColumnDef::new(Appointments::ReminderSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Appointments::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Appointments::UpdatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        for (name, columns) in [
            (
                "idx_appointments_client_date",
                [Appointments::ClientId, Appointments::Date],
            ),
            (
                "idx_appointments_beautician_date",
                [Appointments::BeauticianId, Appointments::Date],
            ),
            (
                "idx_appointments_status_date",
                [Appointments::Status, Appointments::Date],
            ),
        ] {
            let mut index = Index::create()
                .name(name)
                .table(Appointments::Table)
                .to_owned();
            for column in columns {
                index.col(column);
            }
            manager.create_index(index).await?;
        }

        // The uniqueness invariant: no two *active* appointments may share a
        // beautician/date/slot triple. The schema builder cannot express a
        // partial index, so raw SQL it is; the predicate syntax is shared by
        // SQLite and Postgres.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX ux_appointments_active_slot \
                 ON appointments (beautician_id, date, time_slot) \
                 WHERE status IN ('pending', 'confirmed')",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Beauticians::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    ClientId,
    ServiceId,
    BeauticianId,
    Date,
    TimeSlot,
    DurationMinutes,
    Price,
    Status,
    Notes,
    ClientNotes,
    ReminderSent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Beauticians {
    Table,
    Id,
    Name,
    Active,
    WorkingHours,
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Name,
    DurationMinutes,
    Price,
    Active,
}
