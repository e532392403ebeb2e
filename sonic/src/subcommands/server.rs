use super::Session;

pub(super) fn identity(session: &Session) -> anyhow::Result<()> {
    let services = session.services();
    println!("instance = {}", services.instance());
    println!("server_id = {}", services.server_id());
    if services.server_id().is_unknown() {
        log::warn!("No server url configured for instance {}", services.instance());
    }
    println!("cache = {:?}", services.store().path());
    Ok(())
}

pub(super) fn config(session: &Session) -> anyhow::Result<()> {
    println!("{:#?}", session.module().client_configuration());
    Ok(())
}

pub(super) async fn ping(session: &Session) -> anyhow::Result<()> {
    let service = session.service();
    service.ping().await?;
    let license = service.is_license_valid().await?;
    println!("ok (license {})", if license { "valid" } else { "invalid" });
    Ok(())
}
