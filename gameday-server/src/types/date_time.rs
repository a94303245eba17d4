use chrono::{SecondsFormat, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode};
use std::fmt::{Display, Formatter};

/// UTC timestamp with millisecond precision.
///
/// Stored as RFC 3339 text, so the precision is truncated on construction to keep values stable
/// across a database round trip and to keep lexicographic order equal to chronological order.
#[derive(
	derive_more::From,
	derive_more::Into,
	derive_more::Deref,
	derive_more::DerefMut,
	Serialize,
	Deserialize,
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
)]
#[serde(transparent)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
	pub fn now() -> Self {
		Self::from_chrono(Utc::now())
	}

	pub fn from_chrono(date_time: chrono::DateTime<Utc>) -> Self {
		Self(date_time.trunc_subsecs(3))
	}

	#[must_use]
	pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
		self.0.checked_add_signed(delta).map(Self)
	}

	#[must_use]
	pub fn checked_sub(self, delta: TimeDelta) -> Option<Self> {
		self.0.checked_sub_signed(delta).map(Self)
	}
}

impl Display for DateTime {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		formatter.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
	}
}

impl<'r, Db> Decode<'r, Db> for DateTime
where
	Db: Database,
	chrono::DateTime<Utc>: Decode<'r, Db>,
{
	fn decode(value: <Db as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
		chrono::DateTime::<Utc>::decode(value).map(DateTime)
	}
}

impl<'q, Db> Encode<'q, Db> for DateTime
where
	Db: Database,
	chrono::DateTime<Utc>: Encode<'q, Db>,
{
	fn encode_by_ref(&self, buffer: &mut <Db as Database>::ArgumentBuffer<'q>) -> Result<IsNull, BoxDynError> {
		self.0.encode_by_ref(buffer)
	}
}

impl<Db> sqlx::Type<Db> for DateTime
where
	Db: Database,
	chrono::DateTime<Utc>: sqlx::Type<Db>,
{
	fn type_info() -> Db::TypeInfo {
		chrono::DateTime::<Utc>::type_info()
	}

	fn compatible(type_info: &Db::TypeInfo) -> bool {
		chrono::DateTime::<Utc>::compatible(type_info)
	}
}
