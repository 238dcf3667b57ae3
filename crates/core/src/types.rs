/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User ids are issued by the hosted identity provider.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Task deadlines are calendar dates with no time component.
pub type Deadline = chrono::NaiveDate;
