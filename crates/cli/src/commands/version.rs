use tracing::instrument;

#[instrument]
pub fn get_version_info() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");

    tracing::debug!(
        package_name = name,
        package_version = version,
        "Gathering package information"
    );

    format!("{name} {version}")
}
