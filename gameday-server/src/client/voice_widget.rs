use crate::client::api::{ClientError, VoiceTokenSource};
use crate::voice::token::conference_address;
use async_trait::async_trait;
use static_assertions::assert_obj_safe;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DeviceError(pub String);

/// Parameters of an outgoing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallParams {
	pub to: String,
	pub from: String,
}

/// Seam to the telephony vendor SDK.
#[async_trait]
pub trait TelephonyProvider: Send + Sync {
	async fn request_microphone(&self) -> Result<(), DeviceError>;

	fn create_device(&self, token: &str) -> Result<Box<dyn TelephonyDevice>, DeviceError>;
}

assert_obj_safe!(TelephonyProvider);

#[async_trait]
pub trait TelephonyDevice: Send {
	async fn register(&mut self) -> Result<(), DeviceError>;

	async fn connect(&mut self, params: CallParams) -> Result<(), DeviceError>;

	fn disconnect(&mut self);

	fn set_muted(&mut self, muted: bool);

	fn reject_incoming(&mut self);

	fn destroy(&mut self);
}

assert_obj_safe!(TelephonyDevice);

/// Events the device reports about the active call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallEvent {
	Ringing,
	Accept,
	Disconnect,
	Cancel,
	Error(String),
	Incoming,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoiceStatus {
	Uninitialized,
	Initializing,
	Ready,
	Connecting,
	Connected,
	Error(String),
	ShutDown,
}

#[derive(Error, Debug)]
pub enum VoiceWidgetError {
	#[error("Microphone access denied: {0}")]
	Microphone(DeviceError),
	#[error("Failed to fetch voice token: {0}")]
	Token(#[from] ClientError),
	#[error("Telephony device failed: {0}")]
	Device(DeviceError),
	#[error("Voice is not ready.")]
	NotReady,
	#[error("Not in a call.")]
	NotInCall,
}

pub struct VoiceWidget<Tokens, Provider> {
	tokens: Tokens,
	provider: Provider,
	identity: String,
	room_name: String,
	device: Option<Box<dyn TelephonyDevice>>,
	status: VoiceStatus,
	active_call: bool,
	muted: bool,
	participant_count: u32,
}

impl<Tokens: VoiceTokenSource, Provider: TelephonyProvider> VoiceWidget<Tokens, Provider> {
	pub fn new(tokens: Tokens, provider: Provider, identity: impl Into<String>, room_name: impl Into<String>) -> Self {
		Self {
			tokens,
			provider,
			identity: identity.into(),
			room_name: room_name.into(),
			device: None,
			status: VoiceStatus::Uninitialized,
			active_call: false,
			muted: false,
			participant_count: 0,
		}
	}

	pub fn status(&self) -> &VoiceStatus {
		&self.status
	}

	pub fn is_muted(&self) -> bool {
		self.muted
	}

	pub fn participant_count(&self) -> u32 {
		self.participant_count
	}

	/// Sets up a fresh device, releasing any previous one first.
	pub async fn initialize(&mut self) -> Result<(), VoiceWidgetError> {
		self.release_device();
		self.reset_call();
		self.status = VoiceStatus::Initializing;
		match self.set_up_device().await {
			Ok(device) => {
				self.device = Some(device);
				self.status = VoiceStatus::Ready;
				info!(identity = %self.identity, room_name = %self.room_name, "Voice device ready.");
				Ok(())
			}
			Err(error) => Err(self.fail(error)),
		}
	}

	async fn set_up_device(&self) -> Result<Box<dyn TelephonyDevice>, VoiceWidgetError> {
		self.provider
			.request_microphone()
			.await
			.map_err(VoiceWidgetError::Microphone)?;
		let token = self.tokens.fetch_token(&self.identity, &self.room_name).await?;
		let mut device = self
			.provider
			.create_device(&token.token)
			.map_err(VoiceWidgetError::Device)?;
		device.register().await.map_err(VoiceWidgetError::Device)?;

		Ok(device)
	}

	pub async fn join(&mut self) -> Result<(), VoiceWidgetError> {
		let (VoiceStatus::Ready, Some(device)) = (&self.status, self.device.as_mut()) else {
			return Err(VoiceWidgetError::NotReady);
		};
		let params = CallParams {
			to: conference_address(&self.room_name),
			from: self.identity.clone(),
		};

		self.status = VoiceStatus::Connecting;
		let connected = device.connect(params).await;
		self.active_call = connected.is_ok();
		connected.map_err(|error| self.fail(VoiceWidgetError::Device(error)))
	}

	pub fn leave(&mut self) -> Result<(), VoiceWidgetError> {
		if !self.active_call {
			return Err(VoiceWidgetError::NotInCall);
		}
		if let Some(device) = self.device.as_mut() {
			device.disconnect();
		}
		self.reset_call();
		Ok(())
	}

	pub fn toggle_mute(&mut self) -> Result<bool, VoiceWidgetError> {
		let (VoiceStatus::Connected, Some(device)) = (&self.status, self.device.as_mut()) else {
			return Err(VoiceWidgetError::NotInCall);
		};
		self.muted = !self.muted;
		device.set_muted(self.muted);
		Ok(self.muted)
	}

	pub fn handle_event(&mut self, event: CallEvent) {
		debug!(?event, "Call event.");
		match event {
			CallEvent::Ringing => self.status = VoiceStatus::Connecting,
			CallEvent::Accept => {
				self.status = VoiceStatus::Connected;
				self.participant_count = 1;
			}
			CallEvent::Disconnect | CallEvent::Cancel => self.reset_call(),
			CallEvent::Error(message) => {
				warn!(%message, "Call failed.");
				self.status = VoiceStatus::Error(message);
			}
			CallEvent::Incoming => {
				info!("Rejecting incoming call, only outbound calls are supported.");
				if let Some(device) = self.device.as_mut() {
					device.reject_incoming();
				}
			}
		}
	}

	pub fn shutdown(&mut self) {
		self.release_device();
		self.reset_call();
		self.status = VoiceStatus::ShutDown;
	}

	/// Hangs up a call that is still open on the device, even after a call error, then destroys it.
	fn release_device(&mut self) {
		if let Some(mut device) = self.device.take() {
			if self.active_call {
				device.disconnect();
			}
			device.destroy();
		}
	}

	fn reset_call(&mut self) {
		self.status = VoiceStatus::Ready;
		self.active_call = false;
		self.muted = false;
		self.participant_count = 0;
	}

	fn fail(&mut self, error: VoiceWidgetError) -> VoiceWidgetError {
		warn!(%error, "Voice widget failed.");
		self.status = VoiceStatus::Error(error.to_string());
		error
	}
}
