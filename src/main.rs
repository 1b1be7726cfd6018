use clap::Parser;
use tracing::{error, info, Instrument};

use people_roster::app_system::{setup_tracing, RosterConfig, RosterSystem};
use people_roster::view_model::{NoticeDuration, PeopleIntent, PersonIntent};

/// People roster demo: seeds a store, removes a person optimistically and undoes it
#[derive(Parser, Debug)]
struct Cli {
    /// Capacity of the request channel in front of the store
    #[clap(
        short,
        long,
        default_value_t = 32,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    buffer_size: usize,

    /// Start with an empty store
    #[clap(long)]
    no_seed: bool,

    #[clap(long, default_value_t = 2)]
    name_min: usize,

    #[clap(long, default_value_t = 64)]
    name_max: usize,

    /// Show notices for a short time only
    #[clap(long)]
    short_notices: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let args = Cli::parse();
    let notice_duration = if args.short_notices {
        NoticeDuration::Short
    } else {
        NoticeDuration::Long
    };
    let config = RosterConfig::default()
        .set_buffer_size(args.buffer_size)
        .set_seed_on_start(!args.no_seed)
        .set_name_bounds(args.name_min, args.name_max)
        .set_notice_duration(notice_duration);

    info!("Starting people roster");
    let system = RosterSystem::start(config)
        .await
        .map_err(|e| e.to_string())?;

    let mut vm = system.view_model();
    let mut people_state = vm.people_state();

    vm.handle_people_intent(PeopleIntent::Fetch);
    people_state
        .wait_for(|state| !state.is_loading)
        .await
        .map_err(|e| e.to_string())?;

    let first = people_state.borrow().people.first().cloned();
    let Some(person) = first else {
        info!("Store is empty, nothing to remove");
        drop(vm);
        return system.shutdown().await;
    };

    let span = tracing::info_span!("remove_and_undo", person = %person);
    async {
        info!(shown = people_state.borrow().people.len(), "Removing first person");
        vm.handle_person_intent(PersonIntent::RemoveUndo(person.clone()));
        vm.settle().await;
        info!(shown = people_state.borrow().people.len(), "Removed, undo offered");

        vm.handle_person_intent(PersonIntent::Undo);
        vm.settle().await;
        info!(shown = people_state.borrow().people.len(), "Undo applied");
    }
    .instrument(span)
    .await;

    match system.person_client.count().await {
        Ok(stored) => info!(stored, "Store count after undo"),
        Err(e) => error!(error = %e, "Could not count people"),
    }
    if let Some(notice) = vm.errors().current() {
        error!(message = %notice.message, "Notice pending");
    }

    drop(vm);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_must_be_positive() {
        assert!(Cli::try_parse_from(["people_roster", "--buffer-size", "0"]).is_err());

        let args = Cli::try_parse_from(["people_roster", "-b", "4", "--no-seed"]).unwrap();
        assert_eq!(args.buffer_size, 4);
        assert!(args.no_seed);
    }
}
