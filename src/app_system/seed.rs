use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use tracing::{info, instrument};

use crate::clients::PersonClient;
use crate::domain::Person;
use crate::person_actor::PersonError;

const FIRST_NAMES: [&str; 26] = [
    "Arne", "Berta", "Cord", "Dagmar", "Ernst", "Frieda", "Günter", "Hanna", "Ingo", "Johanna",
    "Klaus", "Luise", "Martin", "Nadja", "Otto", "Patrizia", "Quirin", "Rebecca", "Stefan",
    "Tanja", "Uwe", "Veronika", "Walter", "Xaver", "Yvonne", "Zwantje",
];

const LAST_NAMES: [&str; 26] = [
    "Arndt", "Bauer", "Conrad", "Diehl", "Engel", "Fischer", "Graf", "Hoffmann", "Imhoff", "Jung",
    "Klein", "Lang", "Meier", "Neumann", "Olbrich", "Peters", "Quart", "Richter", "Schmidt",
    "Thormann", "Ulrich", "Vogel", "Wagner", "Xander", "Yakov", "Zander",
];

const EMAIL_PROVIDERS: [&str; 10] = [
    "gmail.com", "icloud.com", "outlook.com", "yahoo.com", "t-online.de", "gmx.de", "freenet.de",
    "mailbox.org", "yahoo.com", "web.de",
];

lazy_static! {
    static ref NOT_ADDRESS_SAFE: Regex = Regex::new(r"[^A-Za-z0-9@._-]").unwrap();
}

/// Id of the one fixed demo record.
pub const MUSTERMANN_ID: &str = "10000000-0000-0000-0000-000000000000";

/// Transliterates a name into characters an email address may carry.
///
/// German umlauts and ß are spelled out (ü -> ue), other accented Latin letters
/// lose their accent, and anything still outside `[A-Za-z0-9@._-]` is dropped.
pub fn to_address_part(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            'ä' => folded.push_str("ae"),
            'ö' => folded.push_str("oe"),
            'ü' => folded.push_str("ue"),
            'Ä' => folded.push_str("Ae"),
            'Ö' => folded.push_str("Oe"),
            'Ü' => folded.push_str("Ue"),
            'ß' => folded.push_str("ss"),
            'à' | 'á' | 'â' | 'ã' | 'å' => folded.push('a'),
            'À' | 'Á' | 'Â' | 'Ã' | 'Å' => folded.push('A'),
            'ç' => folded.push('c'),
            'Ç' => folded.push('C'),
            'è' | 'é' | 'ê' | 'ë' => folded.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => folded.push('E'),
            'ì' | 'í' | 'î' | 'ï' => folded.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => folded.push('I'),
            'ñ' => folded.push('n'),
            'Ñ' => folded.push('N'),
            'ò' | 'ó' | 'ô' | 'õ' => folded.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' => folded.push('O'),
            'ù' | 'ú' | 'û' => folded.push('u'),
            'Ù' | 'Ú' | 'Û' => folded.push('U'),
            'ý' | 'ÿ' => folded.push('y'),
            'Ý' => folded.push('Y'),
            other => folded.push(other),
        }
    }
    NOT_ADDRESS_SAFE.replace_all(&folded, "").into_owned()
}

/// Demo data: one random person per first-name slot plus Erika Mustermann.
pub fn demo_people(rng: &mut impl Rng) -> Vec<Person> {
    let mut people: Vec<Person> = (0..FIRST_NAMES.len())
        .map(|_| {
            let first_name = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last_name = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let provider = EMAIL_PROVIDERS.choose(rng).copied().unwrap_or("web.de");
            let email = format!(
                "{}.{}@{}",
                to_address_part(first_name).to_lowercase(),
                to_address_part(last_name).to_lowercase(),
                provider
            );
            let phone = format!(
                "0{} {}-{}",
                rng.gen_range(1234..9999),
                rng.gen_range(100..999),
                rng.gen_range(10..9999)
            );
            Person::new(first_name, last_name)
                .with_email(email)
                .with_phone(phone)
        })
        .collect();

    people.push(
        Person::new("Erika", "Mustermann")
            .with_id(MUSTERMANN_ID)
            .with_email("e.mustermann@t-online.de")
            .with_phone("0987 6543-210"),
    );
    people
}

/// Inserts the demo people when the store is empty. Returns how many were added.
#[instrument(skip(client))]
pub async fn seed_if_empty(client: &PersonClient) -> Result<usize, PersonError> {
    let existing = client.count().await?;
    if existing > 0 {
        info!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }
    // ThreadRng is !Send and must be gone before the await
    let people = demo_people(&mut rand::thread_rng());
    let added = client.create_all(people).await?;
    info!(added, "Seeded store");
    Ok(added)
}
