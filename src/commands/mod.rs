use serenity::{
    async_trait,
    builder::CreateApplicationCommand,
    client::Context,
    model::{
        application::{
            command::Command as ApplicationCommand,
            interaction::application_command::ApplicationCommandInteraction,
        },
        id::GuildId,
    },
    prelude::TypeMapKey,
};

use std::{path::PathBuf, sync::Arc};

use crate::{models::Endpoint, presenter::Presenter, tmdb::TmdbClient};

use self::movies::{
    MovieListing, NowPlayingCommand, PopularCommand, TopRatedCommand, TrendingCommand,
    UpcomingCommand,
};

pub mod movies;

/// Everything a command needs to serve a listing. Built once at startup.
pub struct BotState {
    pub tmdb: TmdbClient,
    pub presenter: Presenter,
    pub logo_path: PathBuf,
}

impl TypeMapKey for BotState {
    type Value = Arc<BotState>;
}

pub enum BotCommands {
    Trending(TrendingCommand),
    Upcoming(UpcomingCommand),
    NowPlaying(NowPlayingCommand),
    Popular(PopularCommand),
    TopRated(TopRatedCommand),
}

impl BotCommands {
    pub fn parse(
        _ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<Self, ParseError> {
        Self::from_name(command.data.name.as_str())
    }

    /// Pick the command registered under `name`. None of the commands take options, so the
    /// name is all there is to parse.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        match name {
            name if name == TrendingCommand::name() => Ok(Self::Trending(TrendingCommand)),
            name if name == UpcomingCommand::name() => Ok(Self::Upcoming(UpcomingCommand)),
            name if name == NowPlayingCommand::name() => Ok(Self::NowPlaying(NowPlayingCommand)),
            name if name == PopularCommand::name() => Ok(Self::Popular(PopularCommand)),
            name if name == TopRatedCommand::name() => Ok(Self::TopRated(TopRatedCommand)),
            name => Err(ParseError::UnknownCommand(name.to_owned())),
        }
    }

    /// The listing this command serves
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Trending(_) => TrendingCommand::ENDPOINT,
            Self::Upcoming(_) => UpcomingCommand::ENDPOINT,
            Self::NowPlaying(_) => NowPlayingCommand::ENDPOINT,
            Self::Popular(_) => PopularCommand::ENDPOINT,
            Self::TopRated(_) => TopRatedCommand::ENDPOINT,
        }
    }

    pub async fn invoke(
        &self,
        ctx: &Context,
        command_interaction: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError> {
        match self {
            Self::Trending(command) => command.invoke(ctx, command_interaction).await,
            Self::Upcoming(command) => command.invoke(ctx, command_interaction).await,
            Self::NowPlaying(command) => command.invoke(ctx, command_interaction).await,
            Self::Popular(command) => command.invoke(ctx, command_interaction).await,
            Self::TopRated(command) => command.invoke(ctx, command_interaction).await,
        }
    }
}

/// Register every command, either to a single guild or globally
pub async fn register_commands(
    ctx: &Context,
    guild_id: Option<GuildId>,
) -> Result<Vec<ApplicationCommand>, serenity::Error> {
    if let Some(guild_id) = guild_id {
        guild_id
            .set_application_commands(&ctx.http, |commands_builder| {
                commands_builder
                    .create_application_command(|command| TrendingCommand::register(command))
                    .create_application_command(|command| UpcomingCommand::register(command))
                    .create_application_command(|command| NowPlayingCommand::register(command))
                    .create_application_command(|command| PopularCommand::register(command))
                    .create_application_command(|command| TopRatedCommand::register(command))
            })
            .await
    } else {
        ApplicationCommand::set_global_application_commands(&ctx.http, |commands_builder| {
            commands_builder
                .create_application_command(|command| TrendingCommand::register(command))
                .create_application_command(|command| UpcomingCommand::register(command))
                .create_application_command(|command| NowPlayingCommand::register(command))
                .create_application_command(|command| PopularCommand::register(command))
                .create_application_command(|command| TopRatedCommand::register(command))
        })
        .await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("{0} was not set up before the client started")]
    MissingState(&'static str),

    #[error("failed to acknowledge the interaction: {0}")]
    Discord(#[from] serenity::Error),
}

pub trait Command: ApplicationCommandInteractionHandler + Sized {
    /// Describe this command so that it can be registered
    fn register(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand;
    /// The name users type to invoke the command
    fn name() -> &'static str;
}

#[async_trait]
pub trait ApplicationCommandInteractionHandler {
    async fn invoke(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError>;
}
