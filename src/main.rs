use marquee::{
    commands::{register_commands, BotCommands, BotState},
    config::Config,
    presenter::Presenter,
    tmdb::TmdbClient,
};
use serenity::{
    async_trait,
    client::{Context, EventHandler},
    model::{
        application::interaction::Interaction,
        gateway::Ready,
        id::GuildId,
    },
    prelude::GatewayIntents,
    Client,
};
use std::{process, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

struct Handler {
    test_guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command_interaction) = interaction {
            let name = command_interaction.data.name.clone();
            match BotCommands::parse(&ctx, &command_interaction) {
                Ok(command) => {
                    if let Err(why) = command.invoke(&ctx, &command_interaction).await {
                        error!(command = %name, "Failed to invoke command: {}", why);
                    }
                }
                Err(why) => warn!(command = %name, "Failed to parse command: {}", why),
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        match register_commands(&ctx, self.test_guild_id).await {
            Ok(commands) => info!(
                "Registered {} commands {}",
                commands.len(),
                match self.test_guild_id {
                    Some(id) => format!("for guild_id: {}", id),
                    None => "globally".to_owned(),
                },
            ),
            Err(why) => error!("Failed to register commands: {}", why),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(why) => {
            error!("Invalid configuration: {}", why);
            process::exit(1);
        }
    };

    let tmdb = match TmdbClient::new(config.tmdb.clone()) {
        Ok(tmdb) => tmdb,
        Err(why) => {
            error!("Unable to create the TMDB client: {}", why);
            process::exit(1);
        }
    };
    let state = BotState {
        tmdb,
        presenter: Presenter::new(&config.presenter),
        logo_path: config.presenter.logo_path.clone(),
    };
    if !state.logo_path.exists() {
        warn!(
            "Logo {} not found, movie cards will fail to send",
            state.logo_path.display()
        );
    }

    let handler = Handler {
        test_guild_id: config.test_guild_id,
    };
    let mut client = match Client::builder(&config.discord_token, GatewayIntents::empty())
        .event_handler(handler)
        .await
    {
        Ok(client) => client,
        Err(why) => {
            error!("Err creating client: {:?}", why);
            process::exit(1);
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<BotState>(Arc::new(state));
    }

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
