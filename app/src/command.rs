//! Typed commands of the terminal front-end
//!
//! A line is parsed against the mounted page; the result is a list of
//! actions to send, or a front-end instruction.

use crate::app::{AppAction, AppState, Page, PageKind};
use crate::features::admin::{AdminAction, AdminTab, MovieField, ShowField};
use crate::features::booking::BookingAction;
use crate::features::confirmation::ConfirmationAction;
use crate::features::listing::ListingAction;
use crate::route::Route;
use cinema_api::ShowId;
use thiserror::Error;

/// What the front-end should do with a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send these actions, in order
    Dispatch(Vec<AppAction>),
    /// Print the help text
    Help,
    /// Leave
    Quit,
    /// Nothing typed
    Nothing,
}

/// A line that is not a command here
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unknown word
    #[error("Unknown command {0:?}; type `help`")]
    Unknown(String),
    /// Known word, wrong arguments
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Help text for a page
#[must_use]
pub fn help(page: PageKind) -> &'static str {
    match page {
        PageKind::Listing => {
            "book <show id>       open the booking page of a show\n\
             admin                open the admin page\n\
             open <path>          go to a path, e.g. /booking/3\n\
             reload | quit"
        },
        PageKind::Booking => {
            "seat <n> [n ...]     toggle seats\n\
             name <your name>     set the customer name\n\
             email <address>      set the customer email\n\
             submit               confirm the booking\n\
             back | reload | quit"
        },
        PageKind::Confirmation => "home | reload | quit",
        PageKind::Admin => {
            "tab movie|show\n\
             movie title|description|duration <value>\n\
             show movie|screen|start|seats <value>   (start: YYYY-MM-DDTHH:MM)\n\
             submit               submit the open form\n\
             home | reload | quit"
        },
        PageKind::NotFound => "home | quit",
    }
}

/// Parse one line typed while `state` is mounted
///
/// # Errors
///
/// [`CommandError`] when the line is not a command on this page.
pub fn parse(line: &str, state: &AppState) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let single = |action: AppAction| Ok(Command::Dispatch(vec![action]));

    match (word, &state.page) {
        ("", _) => Ok(Command::Nothing),
        ("help" | "?", _) => Ok(Command::Help),
        ("quit" | "exit", _) => Ok(Command::Quit),
        ("home", Page::Confirmation(_)) => {
            single(AppAction::Confirmation(ConfirmationAction::ReturnHome))
        },
        ("home", _) => single(AppAction::Navigate(Route::Listing)),
        ("admin", _) => single(AppAction::Navigate(Route::Admin)),
        ("reload", _) => single(AppAction::Navigate(state.route)),
        ("open", _) if !rest.is_empty() => single(AppAction::Open {
            path: rest.to_string(),
        }),
        ("open", _) => Err(CommandError::Usage("open <path>")),

        ("book", Page::Listing(_)) => rest
            .parse::<ShowId>()
            .map(|show_id| {
                Command::Dispatch(vec![AppAction::Listing(ListingAction::Book { show_id })])
            })
            .map_err(|_| CommandError::Usage("book <show id>")),

        ("seat" | "seats", Page::Booking(_)) => {
            let seats = rest
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::parse::<u32>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| CommandError::Usage("seat <n> [n ...]"))?;
            if seats.is_empty() {
                return Err(CommandError::Usage("seat <n> [n ...]"));
            }
            Ok(Command::Dispatch(
                seats
                    .into_iter()
                    .map(|seat| AppAction::Booking(BookingAction::ToggleSeat { seat }))
                    .collect(),
            ))
        },
        ("name", Page::Booking(_)) => {
            single(AppAction::Booking(BookingAction::SetCustomerName(rest.to_string())))
        },
        ("email", Page::Booking(_)) => {
            single(AppAction::Booking(BookingAction::SetCustomerEmail(rest.to_string())))
        },
        ("submit", Page::Booking(_)) => single(AppAction::Booking(BookingAction::Submit)),
        ("back", Page::Booking(_)) => single(AppAction::Booking(BookingAction::Back)),

        ("tab", Page::Admin(_)) => match rest {
            "movie" => single(AppAction::Admin(AdminAction::SelectTab(AdminTab::Movie))),
            "show" => single(AppAction::Admin(AdminAction::SelectTab(AdminTab::Show))),
            _ => Err(CommandError::Usage("tab movie|show")),
        },
        ("movie", Page::Admin(_)) => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "title" => MovieField::Title,
                "description" => MovieField::Description,
                "duration" => MovieField::Duration,
                _ => return Err(CommandError::Usage("movie title|description|duration <value>")),
            };
            single(AppAction::Admin(AdminAction::EditMovie(field, value.trim().to_string())))
        },
        ("show", Page::Admin(_)) => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "movie" => ShowField::Movie,
                "screen" => ShowField::Screen,
                "start" => ShowField::StartTime,
                "seats" => ShowField::TotalSeats,
                _ => return Err(CommandError::Usage("show movie|screen|start|seats <value>")),
            };
            single(AppAction::Admin(AdminAction::EditShow(field, value.trim().to_string())))
        },
        ("submit", Page::Admin(admin)) => single(AppAction::Admin(match admin.tab {
            AdminTab::Movie => AdminAction::SubmitMovie,
            AdminTab::Show => AdminAction::SubmitShow,
        })),

        (word, _) => Err(CommandError::Unknown(word.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::admin::AdminState;
    use crate::features::booking::BookingState;

    fn on(page: Page) -> AppState {
        AppState {
            page,
            ..AppState::default()
        }
    }

    #[test]
    fn seat_list_toggles_each_seat() {
        let state = on(Page::Booking(BookingState::for_show(ShowId(1))));
        let command = parse("seat 3, 1 2", &state).unwrap();
        assert_eq!(
            command,
            Command::Dispatch(vec![
                AppAction::Booking(BookingAction::ToggleSeat { seat: 3 }),
                AppAction::Booking(BookingAction::ToggleSeat { seat: 1 }),
                AppAction::Booking(BookingAction::ToggleSeat { seat: 2 }),
            ])
        );
        assert_eq!(
            parse("seat x", &state),
            Err(CommandError::Usage("seat <n> [n ...]"))
        );
    }

    #[test]
    fn page_commands_are_scoped_to_their_page() {
        let listing = AppState::default();
        assert!(matches!(parse("book 4", &listing), Ok(Command::Dispatch(_))));
        assert_eq!(
            parse("submit", &listing),
            Err(CommandError::Unknown("submit".to_string()))
        );
    }

    #[test]
    fn admin_submit_follows_open_tab() {
        let state = on(Page::Admin(AdminState {
            tab: AdminTab::Show,
            ..AdminState::default()
        }));
        assert_eq!(
            parse("submit", &state).unwrap(),
            Command::Dispatch(vec![AppAction::Admin(AdminAction::SubmitShow)])
        );
        assert_eq!(
            parse("movie title  The Matrix ", &state).unwrap(),
            Command::Dispatch(vec![AppAction::Admin(AdminAction::EditMovie(
                MovieField::Title,
                "The Matrix".to_string()
            ))])
        );
    }

    #[test]
    fn global_commands() {
        let state = on(Page::NotFound);
        assert_eq!(parse("  ", &state).unwrap(), Command::Nothing);
        assert_eq!(parse("quit", &state).unwrap(), Command::Quit);
        assert_eq!(
            parse("open /admin", &state).unwrap(),
            Command::Dispatch(vec![AppAction::Open {
                path: "/admin".to_string()
            }])
        );
        assert_eq!(
            parse("home", &state).unwrap(),
            Command::Dispatch(vec![AppAction::Navigate(Route::Listing)])
        );
    }
}
