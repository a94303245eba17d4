use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode};
use std::fmt::{Display, Formatter};

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
pub struct Uuid(uuid::Uuid);

impl Uuid {
	pub fn new_v4() -> Self {
		Self(uuid::Uuid::new_v4())
	}

	pub const fn nil() -> Self {
		Self(uuid::Uuid::nil())
	}

	pub const fn from_u128(value: u128) -> Self {
		Self(uuid::Uuid::from_u128(value))
	}
}

impl Display for Uuid {
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, formatter)
	}
}

impl<'r, Db> Decode<'r, Db> for Uuid
where
	Db: Database,
	uuid::Uuid: Decode<'r, Db>,
{
	fn decode(value: <Db as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
		uuid::Uuid::decode(value).map(Uuid)
	}
}

impl<'q, Db> Encode<'q, Db> for Uuid
where
	Db: Database,
	uuid::Uuid: Encode<'q, Db>,
{
	fn encode_by_ref(&self, buffer: &mut <Db as Database>::ArgumentBuffer<'q>) -> Result<IsNull, BoxDynError> {
		self.0.encode_by_ref(buffer)
	}
}

impl<Db> sqlx::Type<Db> for Uuid
where
	Db: Database,
	uuid::Uuid: sqlx::Type<Db>,
{
	fn type_info() -> Db::TypeInfo {
		uuid::Uuid::type_info()
	}

	fn compatible(type_info: &Db::TypeInfo) -> bool {
		uuid::Uuid::compatible(type_info)
	}
}
