//! Admin profile editor
//!
//! Loads one account's profile for an administrator, lets them edit it in
//! place, saves it back in one call, or deletes the account and sends them
//! back to the dashboard.
//!
//! State is `LoadState` × `EditMode`. `Errored` is absorbing: once the
//! initial fetch fails, nothing else happens in that view instance.

use std::time::Duration;

use bankweb_config::Config;
use bankweb_utils::{strip_currency_symbol, with_currency_prefix};
use serde::{Deserialize, Serialize};

use crate::backend::BankBackend;
use crate::error::{CoreError, CoreResult};
use crate::models::{AccountProfile, ProfileUpdate};
use crate::session::{SessionContext, SessionKeys, TokenStore};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const FETCH_FAILED: &str = "Failed to fetch profile data.";
pub const SAVE_FAILED: &str = "Failed to save profile data.";
pub const DELETE_FAILED: &str = "Failed to delete profile.";
pub const DELETE_SUCCEEDED: &str = "Profile deleted successfully.";

/// The seven fields of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    AccountNumber,
    Balance,
    Name,
    Email,
    Address,
    CountryCode,
    PhoneNumber,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::AccountNumber,
        ProfileField::Balance,
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Address,
        ProfileField::CountryCode,
        ProfileField::PhoneNumber,
    ];

    /// Account number and country code can never be edited
    pub fn is_editable(self) -> bool {
        !matches!(self, ProfileField::AccountNumber | ProfileField::CountryCode)
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::AccountNumber => "Account Number",
            ProfileField::Balance => "Account Balance",
            ProfileField::Name => "Name",
            ProfileField::Email => "Email",
            ProfileField::Address => "Address",
            ProfileField::CountryCode => "Country",
            ProfileField::PhoneNumber => "Phone Number",
        }
    }

    /// Form input name; matches the `ProfileFields` serde names
    pub fn form_name(self) -> &'static str {
        match self {
            ProfileField::AccountNumber => "accountNumber",
            ProfileField::Balance => "balance",
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Address => "address",
            ProfileField::CountryCode => "countryCode",
            ProfileField::PhoneNumber => "phoneNumber",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            ProfileField::Email => "email",
            _ => "text",
        }
    }

    /// Material icon name shown in the input
    pub fn icon(self) -> &'static str {
        match self {
            ProfileField::AccountNumber => "attribution",
            ProfileField::Balance => "currency_pound",
            ProfileField::Name => "person",
            ProfileField::Email => "alternate_email",
            ProfileField::Address => "home",
            ProfileField::CountryCode => "flag",
            ProfileField::PhoneNumber => "smartphone",
        }
    }
}

/// Local copy of the profile. Balance holds the raw value without the symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileFields {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub country_code: String,
    pub balance: String,
}

impl ProfileFields {
    /// The account number always comes from the navigation path
    pub fn from_profile(account_number: &str, profile: AccountProfile) -> Self {
        Self {
            account_number: account_number.to_string(),
            name: profile.name,
            email: profile.email,
            address: profile.address,
            phone_number: profile.phone_number,
            country_code: profile.country_code,
            balance: profile.balance,
        }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::AccountNumber => &self.account_number,
            ProfileField::Balance => &self.balance,
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Address => &self.address,
            ProfileField::CountryCode => &self.country_code,
            ProfileField::PhoneNumber => &self.phone_number,
        }
    }

    fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::AccountNumber => &mut self.account_number,
            ProfileField::Balance => &mut self.balance,
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Address => &mut self.address,
            ProfileField::CountryCode => &mut self.country_code,
            ProfileField::PhoneNumber => &mut self.phone_number,
        }
    }

    /// Body of the update call: every field except the account number
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            country_code: self.country_code.clone(),
            balance: ProfileUpdate::balance_value(&self.balance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Initial fetch failed; terminal
    Errored(String),
    /// Account deleted; local copy discarded
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Viewing => EditMode::Editing,
            EditMode::Editing => EditMode::Viewing,
        }
    }
}

/// Where the view sends the browser next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
    /// How long to wait before navigating
    pub delay: Duration,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
    /// Ask the destination to reload its own data
    pub refresh: bool,
}

impl Navigation {
    pub fn immediate(target: &str) -> Self {
        Self {
            target: target.to_string(),
            delay: Duration::ZERO,
            replace: true,
            refresh: false,
        }
    }

    /// Target URL with the refresh signal encoded as a query parameter
    pub fn href(&self) -> String {
        if !self.refresh {
            return self.target.clone();
        }
        let separator = if self.target.contains('?') { '&' } else { '?' };
        format!("{}{}refresh=true", self.target, separator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub login_path: String,
    pub dashboard_path: String,
    pub redirect_delay: Duration,
    pub currency_symbol: String,
    pub keys: SessionKeys,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ProfileSettings {
    fn from(config: &Config) -> Self {
        Self {
            login_path: config.routes.admin_login.clone(),
            dashboard_path: config.routes.admin_dashboard.clone(),
            redirect_delay: config.delete_redirect_delay(),
            currency_symbol: config.display.currency_symbol.clone(),
            keys: SessionKeys::from(&config.session),
        }
    }
}

pub enum MountOutcome {
    /// No admin session: go to the login view, nothing was fetched
    Redirect(Navigation),
    Mounted(ProfileEditor),
}

/// View state of one profile editor instance
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEditor {
    account_number: String,
    state: LoadState,
    mode: EditMode,
    fields: ProfileFields,
    error: Option<String>,
    success: Option<String>,
    navigation: Option<Navigation>,
    settings: ProfileSettings,
}

impl ProfileEditor {
    /// Fresh instance before anything is fetched
    pub fn loading(account_number: &str, settings: ProfileSettings) -> Self {
        Self {
            account_number: account_number.to_string(),
            state: LoadState::Loading,
            mode: EditMode::Viewing,
            fields: ProfileFields {
                account_number: account_number.to_string(),
                ..ProfileFields::default()
            },
            error: None,
            success: None,
            navigation: None,
            settings,
        }
    }

    /// Login redirect when there is no admin session
    pub fn require_admin(session: &SessionContext, settings: &ProfileSettings) -> Result<(), Navigation> {
        match session.current_admin {
            Some(_) => Ok(()),
            None => Err(Navigation::immediate(&settings.login_path)),
        }
    }

    /// Check the session, then fetch the profile with the stored admin token
    pub async fn mount(
        session: &SessionContext,
        store: &dyn TokenStore,
        backend: &dyn BankBackend,
        account_number: &str,
        settings: ProfileSettings,
    ) -> MountOutcome {
        if let Err(redirect) = Self::require_admin(session, &settings) {
            log::info!("No admin session, redirecting to {}", redirect.target);
            return MountOutcome::Redirect(redirect);
        }

        let mut editor = Self::loading(account_number, settings);
        match editor.fetch(store, backend).await {
            Ok(profile) => {
                editor.fields = ProfileFields::from_profile(account_number, profile);
                editor.state = LoadState::Ready;
            }
            Err(e) => {
                log::warn!("[{}] Fetching profile {} failed: {}", e.code(), account_number, e);
                editor.state = LoadState::Errored(FETCH_FAILED.to_string());
            }
        }
        MountOutcome::Mounted(editor)
    }

    async fn fetch(&self, store: &dyn TokenStore, backend: &dyn BankBackend) -> CoreResult<AccountProfile> {
        let token = self.admin_token(store)?;
        Ok(backend.fetch_admin_profile(&token, &self.account_number).await?)
    }

    /// Rebuild a ready editor from the view-local state the browser carries
    pub fn restore(account_number: &str, mut fields: ProfileFields, mode: EditMode, settings: ProfileSettings) -> Self {
        fields.account_number = account_number.to_string();
        Self {
            account_number: account_number.to_string(),
            state: LoadState::Ready,
            mode,
            fields,
            error: None,
            success: None,
            navigation: None,
            settings,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Pending navigation after a successful delete
    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Whether the input for `field` accepts edits right now
    pub fn is_field_enabled(&self, field: ProfileField) -> bool {
        self.is_ready() && self.mode == EditMode::Editing && field.is_editable()
    }

    /// Balance as displayed: currency symbol plus raw value
    pub fn balance_display(&self) -> String {
        with_currency_prefix(&self.settings.currency_symbol, &self.fields.balance)
    }

    /// Value shown in the input for `field`
    pub fn display_value(&self, field: ProfileField) -> String {
        match field {
            ProfileField::Balance => self.balance_display(),
            _ => self.fields.get(field).to_string(),
        }
    }

    /// Flip between viewing and editing. Field values are left alone.
    pub fn toggle_edit(&mut self) {
        if self.is_ready() {
            self.mode = self.mode.toggled();
        }
    }

    /// Apply a local edit. Returns false when the field is not editable right now.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> bool {
        if !self.is_field_enabled(field) {
            return false;
        }
        let value = match field {
            ProfileField::Balance => strip_currency_symbol(&self.settings.currency_symbol, value),
            _ => value.to_string(),
        };
        *self.fields.get_mut(field) = value;
        true
    }

    /// Persist all current values in one request
    pub async fn save(&mut self, store: &dyn TokenStore, backend: &dyn BankBackend) -> CoreResult<()> {
        if !self.is_ready() || self.mode != EditMode::Editing {
            return Err(CoreError::InvalidState { action: "save" });
        }

        match self.persist(store, backend).await {
            Ok(()) => {
                log::info!("Saved profile {}", self.account_number);
                self.error = None;
                self.mode = EditMode::Viewing;
                Ok(())
            }
            Err(e) => {
                log::warn!("[{}] Saving profile {} failed: {}", e.code(), self.account_number, e);
                self.error = Some(SAVE_FAILED.to_string());
                Err(e)
            }
        }
    }

    async fn persist(&self, store: &dyn TokenStore, backend: &dyn BankBackend) -> CoreResult<()> {
        let token = self.admin_token(store)?;
        let update = self.fields.to_update();
        Ok(backend.update_admin_profile(&token, &self.account_number, &update).await?)
    }

    /// Delete the account; on success schedule the dashboard redirect.
    /// Only offered while viewing.
    pub async fn delete(&mut self, store: &dyn TokenStore, backend: &dyn BankBackend) -> CoreResult<()> {
        if !self.is_ready() || self.mode != EditMode::Viewing {
            return Err(CoreError::InvalidState { action: "delete" });
        }

        let result = match self.admin_token(store) {
            Ok(token) => backend
                .delete_account(&token, &self.account_number)
                .await
                .map_err(CoreError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                log::info!("Deleted account {}", self.account_number);
                self.fields = ProfileFields::default();
                self.state = LoadState::Deleted;
                self.error = None;
                self.success = Some(DELETE_SUCCEEDED.to_string());
                self.navigation = Some(Navigation {
                    target: self.settings.dashboard_path.clone(),
                    delay: self.settings.redirect_delay,
                    replace: false,
                    refresh: true,
                });
                Ok(())
            }
            Err(e) => {
                log::warn!("[{}] Deleting account {} failed: {}", e.code(), self.account_number, e);
                self.error = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }

    fn admin_token(&self, store: &dyn TokenStore) -> CoreResult<crate::session::BearerToken> {
        self.settings.keys.admin_token(store).ok_or_else(|| CoreError::MissingToken {
            key: self.settings.keys.admin_token.clone(),
        })
    }
}
