use std::{borrow::Cow, path::Path};

use serenity::{
    async_trait,
    builder::{CreateApplicationCommand, CreateEmbed},
    client::Context,
    http::Http,
    model::{
        application::interaction::application_command::ApplicationCommandInteraction,
        channel::AttachmentType,
    },
};
use tracing::debug;

use super::{ApplicationCommandInteractionHandler, BotState, Command, InvocationError};
use crate::{
    error::SendError,
    formatting::format_movie_embed,
    listing::run_listing,
    models::{Endpoint, MovieCard},
    presenter::{CardSink, LOGO_FILENAME},
};

/// A command that posts one TMDB listing. None of them take options.
pub trait MovieListing: Send + Sync {
    const ENDPOINT: Endpoint;
}

#[derive(Debug)]
pub struct TrendingCommand;

impl MovieListing for TrendingCommand {
    const ENDPOINT: Endpoint = Endpoint::Trending;
}

#[derive(Debug)]
pub struct UpcomingCommand;

impl MovieListing for UpcomingCommand {
    const ENDPOINT: Endpoint = Endpoint::Upcoming;
}

#[derive(Debug)]
pub struct NowPlayingCommand;

impl MovieListing for NowPlayingCommand {
    const ENDPOINT: Endpoint = Endpoint::NowPlaying;
}

#[derive(Debug)]
pub struct PopularCommand;

impl MovieListing for PopularCommand {
    const ENDPOINT: Endpoint = Endpoint::Popular;
}

#[derive(Debug)]
pub struct TopRatedCommand;

impl MovieListing for TopRatedCommand {
    const ENDPOINT: Endpoint = Endpoint::TopRated;
}

impl<T: MovieListing> Command for T {
    fn register(command: &mut CreateApplicationCommand) -> &mut CreateApplicationCommand {
        command
            .name(T::ENDPOINT.command_name())
            .description(T::ENDPOINT.description())
    }

    fn name() -> &'static str {
        T::ENDPOINT.command_name()
    }
}

#[async_trait]
impl<T: MovieListing> ApplicationCommandInteractionHandler for T {
    async fn invoke(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<(), InvocationError> {
        // Fetching can take longer than Discord's initial response window
        command.defer(&ctx.http).await?;

        let state = {
            let data = ctx.data.read().await;
            data.get::<BotState>()
                .cloned()
                .ok_or(InvocationError::MissingState("BotState"))?
        };
        let sink = InteractionSink {
            http: &ctx.http,
            command,
            logo_path: &state.logo_path,
        };
        let outcome = run_listing(&state.tmdb, &state.presenter, T::ENDPOINT, &sink).await;
        debug!(command = T::ENDPOINT.command_name(), ?outcome, "Command finished");
        Ok(())
    }
}

/// Sends cards as follow-ups to a deferred slash command.
pub struct InteractionSink<'a> {
    http: &'a Http,
    command: &'a ApplicationCommandInteraction,
    logo_path: &'a Path,
}

#[async_trait]
impl CardSink for InteractionSink<'_> {
    async fn send_card(&self, card: &MovieCard) -> Result<(), SendError> {
        let logo = tokio::fs::read(self.logo_path)
            .await
            .map_err(|source| SendError::Asset {
                path: self.logo_path.to_path_buf(),
                source,
            })?;
        let mut embed = CreateEmbed::default();
        format_movie_embed(card, &mut embed);
        self.command
            .create_followup_message(self.http, move |message| {
                message.add_embed(embed).add_file(AttachmentType::Bytes {
                    data: Cow::Owned(logo),
                    filename: LOGO_FILENAME.to_owned(),
                })
            })
            .await?;
        Ok(())
    }

    async fn send_text(&self, text: &str) -> Result<(), SendError> {
        self.command
            .create_followup_message(self.http, |message| message.content(text))
            .await?;
        Ok(())
    }
}
