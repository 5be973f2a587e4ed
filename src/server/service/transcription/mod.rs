//! Speech-to-text for episode audio.
//!
//! [`Transcriber`] is the seam to the speech-to-text provider; [`assemblyai::AssemblyAiClient`]
//! is the production implementation. The service is only available when a provider is
//! configured.

pub mod assemblyai;
pub mod lyrics;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::{
    data::episode::EpisodeRepository,
    error::AppError,
    model::episode::{Episode, LyricLine},
};

/// A word with its position in the audio, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedWord {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript {
    pub text: String,
    pub words: Vec<TimedWord>,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes the audio at `audio_url`, waiting for the result.
    async fn transcribe(&self, audio_url: &str) -> Result<Transcript, AppError>;
}

pub struct TranscriptionService<'a> {
    db: &'a DatabaseConnection,
    transcriber: Option<&'a dyn Transcriber>,
}

impl<'a> TranscriptionService<'a> {
    pub fn new(db: &'a DatabaseConnection, transcriber: Option<&'a dyn Transcriber>) -> Self {
        Self { db, transcriber }
    }

    /// Transcribes an episode's audio and stores the text in its `content`.
    ///
    /// # Returns
    /// - `Ok(Some(Episode))` - The episode with its new transcript
    /// - `Ok(None)` - The episode doesn't exist
    /// - `Err(AppError::BadRequest)` - The episode has no audio url
    /// - `Err(AppError::Unavailable)` - No transcription provider configured
    /// - `Err(AppError::Upstream)` - The provider failed
    pub async fn transcribe_episode(&self, id: i32) -> Result<Option<Episode>, AppError> {
        let repo = EpisodeRepository::new(self.db);

        let Some(episode) = repo.get_by_id(id).await? else {
            return Ok(None);
        };

        let audio_url = episode
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Episode has no audio url".to_string()))?;

        let transcript = self.transcriber()?.transcribe(audio_url).await?;

        tracing::info!(
            episode_id = id,
            words = transcript.words.len(),
            "Episode transcribed"
        );

        Ok(repo.set_content(id, transcript.text).await?)
    }

    /// Transcribes arbitrary audio into timed lyric lines.
    ///
    /// # Returns
    /// - `Ok(Vec<LyricLine>)` - Lines in playback order
    /// - `Err(AppError::BadRequest)` - `audio_url` is not an http(s) URL
    pub async fn lyrics(&self, audio_url: &str) -> Result<Vec<LyricLine>, AppError> {
        let url = Url::parse(audio_url)
            .map_err(|e| AppError::BadRequest(format!("Invalid audio url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::BadRequest(
                "Audio url must use http or https".to_string(),
            ));
        }

        let transcript = self.transcriber()?.transcribe(url.as_str()).await?;

        Ok(lyrics::format_lyrics(&transcript.words))
    }

    fn transcriber(&self) -> Result<&'a dyn Transcriber, AppError> {
        self.transcriber
            .ok_or_else(|| AppError::Unavailable("Transcription is not configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    struct FixedTranscriber;

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _audio_url: &str) -> Result<Transcript, AppError> {
            Ok(Transcript {
                text: "Hello there. Bye.".to_string(),
                words: vec![
                    TimedWord {
                        text: "Hello".to_string(),
                        start_ms: 0,
                        end_ms: 400,
                    },
                    TimedWord {
                        text: "there.".to_string(),
                        start_ms: 400,
                        end_ms: 900,
                    },
                    TimedWord {
                        text: "Bye.".to_string(),
                        start_ms: 1200,
                        end_ms: 1500,
                    },
                ],
            })
        }
    }

    /// Tests the transcript text is stored on the episode.
    #[tokio::test]
    async fn stores_transcript_in_content() {
        let test = TestBuilder::new().with_content_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db)
            .await
            .unwrap();
        let episode = factory::episode::EpisodeFactory::new(db, chapter.id)
            .url("https://cdn.example.com/a.mp3")
            .build()
            .await
            .unwrap();

        let transcriber = FixedTranscriber;
        let updated = TranscriptionService::new(db, Some(&transcriber))
            .transcribe_episode(episode.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content.as_deref(), Some("Hello there. Bye."));
    }

    /// Tests an episode without audio cannot be transcribed.
    #[tokio::test]
    async fn episode_without_url_is_bad_request() {
        let test = TestBuilder::new().with_content_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db)
            .await
            .unwrap();
        let episode = factory::episode::EpisodeFactory::new(db, chapter.id)
            .build()
            .await
            .unwrap();

        let transcriber = FixedTranscriber;
        let result = TranscriptionService::new(db, Some(&transcriber))
            .transcribe_episode(episode.id)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    /// Tests missing episodes and missing providers.
    #[tokio::test]
    async fn missing_episode_and_provider() {
        let test = TestBuilder::new().with_content_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let transcriber = FixedTranscriber;
        let missing = TranscriptionService::new(db, Some(&transcriber))
            .transcribe_episode(999)
            .await
            .unwrap();
        assert!(missing.is_none());

        let unconfigured = TranscriptionService::new(db, None)
            .lyrics("https://cdn.example.com/a.mp3")
            .await;
        assert!(matches!(unconfigured, Err(AppError::Unavailable(_))));
    }

    /// Tests lyrics are split at sentence ends and only http(s) urls are accepted.
    #[tokio::test]
    async fn lyrics_from_url() {
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let transcriber = FixedTranscriber;
        let service = TranscriptionService::new(db, Some(&transcriber));

        let lines = service
            .lyrics("https://cdn.example.com/a.mp3")
            .await
            .unwrap();
        assert_eq!(
            lines,
            vec![
                LyricLine {
                    start_ms: 0,
                    end_ms: 900,
                    text: "Hello there.".to_string(),
                },
                LyricLine {
                    start_ms: 1200,
                    end_ms: 1500,
                    text: "Bye.".to_string(),
                },
            ]
        );

        assert!(matches!(
            service.lyrics("ftp://cdn.example.com/a.mp3").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.lyrics("not a url").await,
            Err(AppError::BadRequest(_))
        ));
    }
}
