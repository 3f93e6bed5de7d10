//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod deactivated_user;
pub mod notification;
pub mod patient_info;
pub mod patient_note;
pub mod reminder;
pub mod treatment_relationship;
pub mod user;
pub mod weight_record;

// Re-export specific types to avoid conflicts
pub use deactivated_user::{
    Column as DeactivatedUserColumn, Entity as DeactivatedUser, Model as DeactivatedUserModel,
};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use patient_info::{Column as PatientInfoColumn, Entity as PatientInfo, Model as PatientInfoModel};
pub use patient_note::{Column as PatientNoteColumn, Entity as PatientNote, Model as PatientNoteModel};
pub use reminder::{Column as ReminderColumn, Entity as Reminder, Model as ReminderModel};
pub use treatment_relationship::{
    Column as TreatmentRelationshipColumn, Entity as TreatmentRelationship,
    Model as TreatmentRelationshipModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use weight_record::{
    Column as WeightRecordColumn, Entity as WeightRecord, Model as WeightRecordModel,
};
