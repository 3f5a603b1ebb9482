use anyhow::Context;
use clap::Parser;
use marketing_cloud::{
    config::get_configuration,
    domain::{attributes::parse_pair, Attributes, Email, EmailDefinition},
    telemetry::get_subscriber,
};
use tracing_subscriber::util::SubscriberInitExt;

/// Send one transactional email through Marketing Cloud
#[derive(Parser)]
#[command(about, version)]
struct Args {
    /// Recipient address, also used as the contact key
    recipient: String,

    /// Template attributes as KEY=VALUE; keys must match the data extension exactly
    #[arg(value_parser = parse_pair)]
    attributes: Vec<(String, String)>,

    /// Definition key to send through, defaults to the configured definition
    #[arg(long)]
    definition_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = get_configuration().context("Failed to read configuration.")?;

    get_subscriber(&config.log_level, std::io::stderr).init();

    let recipient = Email::try_from(args.recipient).map_err(anyhow::Error::msg)?;
    let attributes: Attributes = args.attributes.into_iter().collect();

    let email_client = config.marketing_cloud.client()?;
    let session = email_client
        .authorize()
        .await
        .context("Could not authorize with Marketing Cloud")?;

    let definition = config.definition.map(EmailDefinition::from);
    if let Some(definition) = &definition {
        if !email_client
            .check_email_definition(&session, &definition.definition_key)
            .await
        {
            tracing::info!(
                definition_key = %definition.definition_key,
                "email definition not found, creating it"
            );
            email_client
                .create_email_definition(&session, definition)
                .await
                .context("Failed to create the email definition")?;
        }
    }

    let definition_key = args
        .definition_key
        .or_else(|| definition.map(|d| d.definition_key))
        .context("No definition key given and none configured.")?;

    let response = email_client
        .send_email(&session, &definition_key, &recipient, &attributes)
        .await
        .with_context(|| format!("Failed to send email to {}.", recipient))?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
