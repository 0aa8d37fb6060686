use account_models::{AccountRequest, NewAccount};
use chrono::{Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Grace", "Edsger", "Barbara", "Donald", "Frances", "Ken", "Margaret", "Dennis",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Hopper", "Dijkstra", "Liskov", "Knuth", "Allen", "Thompson", "Hamilton",
    "Ritchie",
];
const STREETS: &[&str] = &[
    "Main Street", "Elm Avenue", "Harbour Road", "Station Lane", "Mill Close", "Park Row",
];
const CITIES: &[&str] = &["Springfield", "Riverton", "Lakeside", "Hillcrest", "Fairview"];

/// Generates plausible fake account data.
#[derive(Debug, Default)]
pub struct AccountFactory;

impl AccountFactory {
    /// A complete request body, as a client would post it.
    pub fn request() -> AccountRequest {
        let account = Self::new_account();
        AccountRequest {
            name: Some(account.name),
            email: Some(account.email),
            address: Some(account.address),
            phone_number: account.phone_number,
            date_joined: Some(account.date_joined.format("%Y-%m-%d").to_string()),
        }
    }

    /// Validated fields for writing straight to the store.
    pub fn new_account() -> NewAccount {
        let mut rng = rand::thread_rng();
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Ada");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Lovelace");
        let suffix: u32 = rng.gen_range(1..10_000);

        let address = format!(
            "{} {}, {}",
            rng.gen_range(1..500),
            STREETS.choose(&mut rng).copied().unwrap_or("Main Street"),
            CITIES.choose(&mut rng).copied().unwrap_or("Springfield"),
        );
        let phone_number = rng
            .gen_bool(0.8)
            .then(|| format!("555-{:04}", rng.gen_range(0..10_000)));

        NewAccount {
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}{}@example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                suffix
            ),
            address,
            phone_number,
            date_joined: random_past_date(&mut rng),
        }
    }

    pub fn batch(count: usize) -> Vec<AccountRequest> {
        (0..count).map(|_| Self::request()).collect()
    }
}

fn random_past_date<R: Rng>(rng: &mut R) -> NaiveDate {
    let today = Utc::now().date_naive();
    today - Duration::days(rng.gen_range(0..3650))
}
