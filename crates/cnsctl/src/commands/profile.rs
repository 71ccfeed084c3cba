//! `profile`: show a profile definition

use cns_core::display::render_profile;
use cns_core::{CnsError, Method, Settings, paths};
use tracing::debug;

use crate::error::Result;

pub async fn handle_profile(settings: &Settings, profile: Option<&str>) -> Result<()> {
    let profile = profile.filter(|p| !p.is_empty()).ok_or(CnsError::NoProfile)?;
    debug!("Fetching profile {}", profile);

    let client = super::client(settings)?;
    let data = client
        .invoke_data(
            &settings.dapr_app_id,
            &paths::profile_path(profile),
            Method::GET,
            None,
        )
        .await?;

    println!("{}", render_profile(&data));
    Ok(())
}
