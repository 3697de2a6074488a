use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Primary key column holding an entity id
fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string().not_null().primary_key().to_owned()
}

fn timestamp_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

/// Cascading foreign key from a child to its owning parent
fn owned_by<T, C, P, PC>(
    name: &str,
    child: (T, C),
    parent: (P, PC),
) -> ForeignKeyCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden,
    P: IntoIden + 'static,
    PC: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(child.0, child.1)
        .to(parent.0, parent.1)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users, teams, projects
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_column(Users::Id))
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Department).string())
                    .col(
                        ColumnDef::new(Users::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::LastLoginAt).timestamp_with_time_zone())
                    .col(timestamp_column(Users::CreatedAt))
                    .col(timestamp_column(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(id_column(Teams::Id))
                    .col(ColumnDef::new(Teams::OwnerId).string().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::Description).text())
                    .col(timestamp_column(Teams::CreatedAt))
                    .col(timestamp_column(Teams::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(id_column(TeamMembers::Id))
                    .col(ColumnDef::new(TeamMembers::TeamId).string().not_null())
                    .col(ColumnDef::new(TeamMembers::UserId).string().not_null())
                    .col(ColumnDef::new(TeamMembers::Role).string().not_null())
                    .col(timestamp_column(TeamMembers::CreatedAt))
                    .col(timestamp_column(TeamMembers::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_team_members_team",
                        (TeamMembers::Table, TeamMembers::TeamId),
                        (Teams::Table, Teams::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(id_column(Projects::Id))
                    .col(ColumnDef::new(Projects::OwnerId).string().not_null())
                    .col(ColumnDef::new(Projects::TeamId).string())
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(
                        ColumnDef::new(Projects::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Projects::Status).string().not_null())
                    .col(ColumnDef::new(Projects::StartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Projects::EndDate).timestamp_with_time_zone())
                    .col(timestamp_column(Projects::CreatedAt))
                    .col(timestamp_column(Projects::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(id_column(Reports::Id))
                    .col(ColumnDef::new(Reports::ProjectId).string().not_null())
                    .col(ColumnDef::new(Reports::AuthorId).string().not_null())
                    .col(ColumnDef::new(Reports::Title).string().not_null())
                    .col(ColumnDef::new(Reports::Content).text().not_null())
                    .col(ColumnDef::new(Reports::DetectionSummary).json().not_null())
                    .col(timestamp_column(Reports::CreatedAt))
                    .col(timestamp_column(Reports::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_reports_project",
                        (Reports::Table, Reports::ProjectId),
                        (Projects::Table, Projects::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        // Robots and everything attached to them
        manager
            .create_table(
                Table::create()
                    .table(Robots::Table)
                    .if_not_exists()
                    .col(id_column(Robots::Id))
                    .col(ColumnDef::new(Robots::ProjectId).string())
                    .col(ColumnDef::new(Robots::Name).string().not_null())
                    .col(ColumnDef::new(Robots::Model).string().not_null())
                    .col(
                        ColumnDef::new(Robots::Status)
                            .string()
                            .not_null()
                            .default("offline"),
                    )
                    .col(ColumnDef::new(Robots::BatteryLevel).double().not_null())
                    .col(ColumnDef::new(Robots::SignalStrength).double())
                    .col(ColumnDef::new(Robots::PingMs).integer())
                    .col(ColumnDef::new(Robots::Location).json())
                    .col(ColumnDef::new(Robots::Manufacturer).string())
                    .col(ColumnDef::new(Robots::SerialNumber).string())
                    .col(ColumnDef::new(Robots::FirmwareVersion).string())
                    .col(
                        ColumnDef::new(Robots::TotalOperatingHours)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Robots::LastMaintenanceAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Robots::NextMaintenanceAt).timestamp_with_time_zone())
                    .col(timestamp_column(Robots::CreatedAt))
                    .col(timestamp_column(Robots::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cameras::Table)
                    .if_not_exists()
                    .col(id_column(Cameras::Id))
                    .col(ColumnDef::new(Cameras::RobotId).string().not_null())
                    .col(ColumnDef::new(Cameras::Name).string().not_null())
                    .col(ColumnDef::new(Cameras::StreamUrl).string().not_null())
                    .col(ColumnDef::new(Cameras::StreamType).string().not_null())
                    .col(ColumnDef::new(Cameras::Quality).string().not_null())
                    .col(
                        ColumnDef::new(Cameras::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Cameras::Position).string().not_null())
                    .col(ColumnDef::new(Cameras::LastAccessedAt).timestamp_with_time_zone())
                    .col(timestamp_column(Cameras::CreatedAt))
                    .col(timestamp_column(Cameras::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_cameras_robot",
                        (Cameras::Table, Cameras::RobotId),
                        (Robots::Table, Robots::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DetectionResults::Table)
                    .if_not_exists()
                    .col(id_column(DetectionResults::Id))
                    .col(ColumnDef::new(DetectionResults::CameraId).string().not_null())
                    .col(ColumnDef::new(DetectionResults::ClassLabel).string().not_null())
                    .col(ColumnDef::new(DetectionResults::Confidence).double().not_null())
                    .col(ColumnDef::new(DetectionResults::Bbox).json().not_null())
                    .col(timestamp_column(DetectionResults::CreatedAt))
                    .col(timestamp_column(DetectionResults::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_detection_results_camera",
                        (DetectionResults::Table, DetectionResults::CameraId),
                        (Cameras::Table, Cameras::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SensorData::Table)
                    .if_not_exists()
                    .col(id_column(SensorData::Id))
                    .col(ColumnDef::new(SensorData::RobotId).string().not_null())
                    .col(ColumnDef::new(SensorData::Temperature).double())
                    .col(ColumnDef::new(SensorData::Humidity).double())
                    .col(ColumnDef::new(SensorData::Pressure).double())
                    .col(ColumnDef::new(SensorData::BatteryLevel).double())
                    .col(ColumnDef::new(SensorData::ImuGyro).json())
                    .col(ColumnDef::new(SensorData::ImuAcc).json())
                    .col(timestamp_column(SensorData::CreatedAt))
                    .col(timestamp_column(SensorData::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_sensor_data_robot",
                        (SensorData::Table, SensorData::RobotId),
                        (Robots::Table, Robots::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(id_column(Alerts::Id))
                    .col(ColumnDef::new(Alerts::RobotId).string().not_null())
                    .col(ColumnDef::new(Alerts::Level).string().not_null())
                    .col(ColumnDef::new(Alerts::Message).text().not_null())
                    .col(
                        ColumnDef::new(Alerts::Resolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Alerts::ResolvedBy).string())
                    .col(ColumnDef::new(Alerts::ResolvedAt).timestamp_with_time_zone())
                    .col(timestamp_column(Alerts::CreatedAt))
                    .col(timestamp_column(Alerts::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_alerts_robot",
                        (Alerts::Table, Alerts::RobotId),
                        (Robots::Table, Robots::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MaintenanceRecords::Table)
                    .if_not_exists()
                    .col(id_column(MaintenanceRecords::Id))
                    .col(ColumnDef::new(MaintenanceRecords::RobotId).string().not_null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::MaintenanceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::Status).string().not_null())
                    .col(ColumnDef::new(MaintenanceRecords::Description).text().not_null())
                    .col(timestamp_column(MaintenanceRecords::StartDate))
                    .col(ColumnDef::new(MaintenanceRecords::EndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(MaintenanceRecords::Technician).string())
                    .col(ColumnDef::new(MaintenanceRecords::Cost).double())
                    .col(ColumnDef::new(MaintenanceRecords::PartsReplaced).json().not_null())
                    .col(timestamp_column(MaintenanceRecords::CreatedAt))
                    .col(timestamp_column(MaintenanceRecords::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_maintenance_records_robot",
                        (MaintenanceRecords::Table, MaintenanceRecords::RobotId),
                        (Robots::Table, Robots::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommandHistory::Table)
                    .if_not_exists()
                    .col(id_column(CommandHistory::Id))
                    .col(ColumnDef::new(CommandHistory::RobotId).string().not_null())
                    .col(ColumnDef::new(CommandHistory::UserId).string())
                    .col(ColumnDef::new(CommandHistory::CommandType).string().not_null())
                    .col(ColumnDef::new(CommandHistory::Detail).json())
                    .col(timestamp_column(CommandHistory::CreatedAt))
                    .col(timestamp_column(CommandHistory::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_command_history_robot",
                        (CommandHistory::Table, CommandHistory::RobotId),
                        (Robots::Table, Robots::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RobotStatusHistory::Table)
                    .if_not_exists()
                    .col(id_column(RobotStatusHistory::Id))
                    .col(ColumnDef::new(RobotStatusHistory::RobotId).string().not_null())
                    .col(ColumnDef::new(RobotStatusHistory::Status).string().not_null())
                    .col(ColumnDef::new(RobotStatusHistory::BatteryLevel).double())
                    .col(ColumnDef::new(RobotStatusHistory::Connection).string())
                    .col(ColumnDef::new(RobotStatusHistory::Event).string())
                    .col(timestamp_column(RobotStatusHistory::CreatedAt))
                    .col(timestamp_column(RobotStatusHistory::UpdatedAt))
                    .foreign_key(&mut owned_by(
                        "fk_robot_status_history_robot",
                        (RobotStatusHistory::Table, RobotStatusHistory::RobotId),
                        (Robots::Table, Robots::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        // Parent lookups
        let parent_indexes = [
            ("idx_team_members_team_id", TeamMembers::Table.into_iden(), TeamMembers::TeamId.into_iden()),
            ("idx_reports_project_id", Reports::Table.into_iden(), Reports::ProjectId.into_iden()),
            ("idx_robots_project_id", Robots::Table.into_iden(), Robots::ProjectId.into_iden()),
            ("idx_cameras_robot_id", Cameras::Table.into_iden(), Cameras::RobotId.into_iden()),
            (
                "idx_detection_results_camera_id",
                DetectionResults::Table.into_iden(),
                DetectionResults::CameraId.into_iden(),
            ),
            ("idx_sensor_data_robot_id", SensorData::Table.into_iden(), SensorData::RobotId.into_iden()),
            ("idx_alerts_robot_id", Alerts::Table.into_iden(), Alerts::RobotId.into_iden()),
            (
                "idx_maintenance_records_robot_id",
                MaintenanceRecords::Table.into_iden(),
                MaintenanceRecords::RobotId.into_iden(),
            ),
            (
                "idx_command_history_robot_id",
                CommandHistory::Table.into_iden(),
                CommandHistory::RobotId.into_iden(),
            ),
            (
                "idx_robot_status_history_robot_id",
                RobotStatusHistory::Table.into_iden(),
                RobotStatusHistory::RobotId.into_iden(),
            ),
        ];

        for (name, table, column) in parent_indexes {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents
        manager
            .drop_table(Table::drop().table(RobotStatusHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommandHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MaintenanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SensorData::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DetectionResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cameras::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Robots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Role,
    Department,
    IsDeleted,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Teams {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    UserId,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Projects {
    Table,
    Id,
    OwnerId,
    TeamId,
    Name,
    Description,
    IsPublic,
    Status,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Reports {
    Table,
    Id,
    ProjectId,
    AuthorId,
    Title,
    Content,
    DetectionSummary,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Robots {
    Table,
    Id,
    ProjectId,
    Name,
    Model,
    Status,
    BatteryLevel,
    SignalStrength,
    PingMs,
    Location,
    Manufacturer,
    SerialNumber,
    FirmwareVersion,
    TotalOperatingHours,
    LastMaintenanceAt,
    NextMaintenanceAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Cameras {
    Table,
    Id,
    RobotId,
    Name,
    StreamUrl,
    StreamType,
    Quality,
    IsActive,
    Position,
    LastAccessedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum DetectionResults {
    Table,
    Id,
    CameraId,
    ClassLabel,
    Confidence,
    Bbox,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum SensorData {
    Table,
    Id,
    RobotId,
    Temperature,
    Humidity,
    Pressure,
    BatteryLevel,
    ImuGyro,
    ImuAcc,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum Alerts {
    Table,
    Id,
    RobotId,
    Level,
    Message,
    Resolved,
    ResolvedBy,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum MaintenanceRecords {
    Table,
    Id,
    RobotId,
    MaintenanceType,
    Status,
    Description,
    StartDate,
    EndDate,
    Technician,
    Cost,
    PartsReplaced,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum CommandHistory {
    Table,
    Id,
    RobotId,
    UserId,
    CommandType,
    Detail,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum RobotStatusHistory {
    Table,
    Id,
    RobotId,
    Status,
    BatteryLevel,
    Connection,
    Event,
    CreatedAt,
    UpdatedAt,
}
