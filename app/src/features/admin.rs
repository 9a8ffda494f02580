//! Admin page (`/admin`): create movies and shows

use crate::environment::AppEnvironment;
use cinema_api::{ApiError, Movie, MovieId, NewMovie, NewShow, Show};
use cinema_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;
use thiserror::Error;

/// Shown after a movie is stored
pub const MOVIE_CREATED: &str = "Movie created successfully";
/// Shown when storing a movie fails
pub const MOVIE_FAILED: &str = "Failed to create movie";
/// Shown after a show is stored
pub const SHOW_CREATED: &str = "Show created successfully";
/// Shown when storing a show fails
pub const SHOW_FAILED: &str = "Failed to create show";

/// Which form is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    /// "Create Movie"
    #[default]
    Movie,
    /// "Create Show"
    Show,
}

/// Field of the movie form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    /// Title
    Title,
    /// Description
    Description,
    /// Duration in minutes
    Duration,
}

/// Field of the show form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowField {
    /// Movie identifier
    Movie,
    /// Screen name
    Screen,
    /// Start time, `YYYY-MM-DDTHH:MM`
    StartTime,
    /// Total seats
    TotalSeats,
}

/// A form that cannot be sent as typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is blank
    #[error("Please fill all fields")]
    MissingField,
    /// A numeric field is not a whole number
    #[error("{0} must be a whole number")]
    NotANumber(&'static str),
}

/// Movie form as typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieForm {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Duration in minutes, as typed
    pub duration_minutes: String,
}

impl MovieForm {
    fn set(&mut self, field: MovieField, value: String) {
        match field {
            MovieField::Title => self.title = value,
            MovieField::Description => self.description = value,
            MovieField::Duration => self.duration_minutes = value,
        }
    }

    /// Build the request body
    ///
    /// # Errors
    ///
    /// [`FormError`] when a field is blank or the duration is not a number.
    pub fn to_request(&self) -> Result<NewMovie, FormError> {
        let title = required(&self.title)?;
        let description = required(&self.description)?;
        let duration_minutes = number(&self.duration_minutes, "Duration")?;
        Ok(NewMovie {
            title: title.to_string(),
            description: description.to_string(),
            duration_minutes,
        })
    }
}

/// Show form as typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowForm {
    /// Movie identifier, as typed
    pub movie_id: String,
    /// Screen name
    pub screen_name: String,
    /// Start time, as typed
    pub start_time: String,
    /// Total seats, as typed
    pub total_seats: String,
}

impl ShowForm {
    fn set(&mut self, field: ShowField, value: String) {
        match field {
            ShowField::Movie => self.movie_id = value,
            ShowField::Screen => self.screen_name = value,
            ShowField::StartTime => self.start_time = value,
            ShowField::TotalSeats => self.total_seats = value,
        }
    }

    /// Build the request body; the start time is sent as typed
    ///
    /// # Errors
    ///
    /// [`FormError`] when a field is blank or a number does not parse.
    pub fn to_request(&self) -> Result<NewShow, FormError> {
        let movie_id = MovieId(number(&self.movie_id, "Movie")?);
        let screen_name = required(&self.screen_name)?;
        let start_time = required(&self.start_time)?;
        let total_seats = number(&self.total_seats, "Total seats")?;
        Ok(NewShow {
            movie_id,
            screen_name: screen_name.to_string(),
            start_time: start_time.to_string(),
            total_seats,
        })
    }
}

fn required(value: &str) -> Result<&str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::MissingField)
    } else {
        Ok(value)
    }
}

fn number<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, FormError> {
    required(value)?
        .parse()
        .map_err(|_| FormError::NotANumber(name))
}

/// Admin view-state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminState {
    /// Open form
    pub tab: AdminTab,
    /// Catalogue
    pub movies: Vec<Movie>,
    /// Every show
    pub shows: Vec<Show>,
    /// Movie form
    pub movie_form: MovieForm,
    /// Show form
    pub show_form: ShowForm,
    /// Outcome of the last submission
    pub message: Option<String>,
}

/// Admin actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Fetch movies and shows
    Load,
    /// Movies and shows fetched
    Loaded(Result<(Vec<Movie>, Vec<Show>), ApiError>),
    /// Switch form
    SelectTab(AdminTab),
    /// Movie form edited
    EditMovie(MovieField, String),
    /// Show form edited
    EditShow(ShowField, String),
    /// Movie form submitted
    SubmitMovie,
    /// Service answered the movie submission
    MovieCreated(Result<Movie, ApiError>),
    /// Show form submitted
    SubmitShow,
    /// Service answered the show submission
    ShowCreated(Result<Show, ApiError>),
}

/// Reducer of the admin page
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminReducer;

impl AdminReducer {
    fn load(env: &AppEnvironment) -> Effect<AdminAction> {
        let api = Arc::clone(&env.api);
        Effect::future(async move {
            let result = futures::try_join!(api.list_movies(), api.list_shows());
            Some(AdminAction::Loaded(result))
        })
    }
}

impl Reducer for AdminReducer {
    type State = AdminState;
    type Action = AdminAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut AdminState,
        action: AdminAction,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<AdminAction>; 4]> {
        match action {
            AdminAction::Load => smallvec![Self::load(env)],
            AdminAction::Loaded(Ok((movies, shows))) => {
                state.movies = movies;
                state.shows = shows;
                smallvec![]
            },
            AdminAction::Loaded(Err(error)) => {
                tracing::warn!(%error, "Failed to load admin data");
                smallvec![]
            },
            AdminAction::SelectTab(tab) => {
                state.tab = tab;
                smallvec![]
            },
            AdminAction::EditMovie(field, value) => {
                state.movie_form.set(field, value);
                smallvec![]
            },
            AdminAction::EditShow(field, value) => {
                state.show_form.set(field, value);
                smallvec![]
            },
            AdminAction::SubmitMovie => match state.movie_form.to_request() {
                Ok(movie) => {
                    let api = Arc::clone(&env.api);
                    smallvec![Effect::future(async move {
                        Some(AdminAction::MovieCreated(api.create_movie(movie).await))
                    })]
                },
                Err(error) => {
                    state.message = Some(error.to_string());
                    smallvec![]
                },
            },
            AdminAction::MovieCreated(Ok(movie)) => {
                tracing::info!(movie_id = %movie.id, "Movie created");
                state.message = Some(MOVIE_CREATED.to_string());
                state.movie_form = MovieForm::default();
                smallvec![Self::load(env)]
            },
            AdminAction::MovieCreated(Err(error)) => {
                tracing::warn!(%error, "Failed to create movie");
                state.message = Some(MOVIE_FAILED.to_string());
                smallvec![]
            },
            AdminAction::SubmitShow => match state.show_form.to_request() {
                Ok(show) => {
                    let api = Arc::clone(&env.api);
                    smallvec![Effect::future(async move {
                        Some(AdminAction::ShowCreated(api.create_show(show).await))
                    })]
                },
                Err(error) => {
                    state.message = Some(error.to_string());
                    smallvec![]
                },
            },
            AdminAction::ShowCreated(Ok(show)) => {
                tracing::info!(show_id = %show.id, "Show created");
                state.message = Some(SHOW_CREATED.to_string());
                state.show_form = ShowForm::default();
                smallvec![Self::load(env)]
            },
            AdminAction::ShowCreated(Err(error)) => {
                tracing::warn!(%error, "Failed to create show");
                state.message = Some(SHOW_FAILED.to_string());
                smallvec![]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn movie_form_requires_every_field() {
        let mut form = MovieForm {
            title: "Arrival".to_string(),
            description: " ".to_string(),
            duration_minutes: "116".to_string(),
        };
        assert_eq!(form.to_request(), Err(FormError::MissingField));

        form.description = "Linguistics".to_string();
        form.duration_minutes = "two hours".to_string();
        assert_eq!(form.to_request(), Err(FormError::NotANumber("Duration")));

        form.duration_minutes = " 116 ".to_string();
        assert_eq!(form.to_request().unwrap().duration_minutes, 116);
    }

    #[test]
    fn show_form_coerces_numbers() {
        let form = ShowForm {
            movie_id: "8".to_string(),
            screen_name: "Screen 2".to_string(),
            start_time: "2025-01-06T18:30".to_string(),
            total_seats: "40".to_string(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.movie_id, MovieId(8));
        assert_eq!(request.total_seats, 40);
        assert_eq!(request.start_time, "2025-01-06T18:30");
    }
}
