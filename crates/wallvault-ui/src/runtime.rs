//! Executes reducer effects against a [`CatalogService`].

use crate::features::catalog::actions::{CollectPurpose, Command, Effect};
use crate::features::catalog::bulk::{collect_all, delete_batch};
use crate::services::CatalogService;

/// Carry out one service effect and return the command describing its outcome.
///
/// Host effects ([`Effect::is_host`]) are left to the driver and yield `None`.
pub async fn execute<S>(service: &S, effect: Effect) -> Option<Command>
where
    S: CatalogService + ?Sized,
{
    let command = match effect {
        Effect::FetchCatalog { query, targets } => Command::CatalogArrived {
            targets,
            result: service.list(&query).await,
        },
        Effect::FetchStats { query, ticket } => Command::StatsArrived {
            ticket,
            result: service.stats(&query).await,
        },
        Effect::FetchUsers { ticket } => Command::UsersArrived {
            ticket,
            result: service.users().await,
        },
        Effect::CheckPaths => Command::PathStatusArrived(service.path_status().await),
        Effect::FetchDetail { id, ticket } => Command::DetailArrived {
            ticket,
            result: service.detail(&id).await,
        },
        Effect::DeleteBatch(ids) => Command::BatchFinished(delete_batch(service, &ids).await),
        Effect::DeleteOne(id) => {
            let result = service.delete(&id).await;
            Command::Deleted { id, result }
        }
        Effect::CollectPartition {
            kind,
            filter,
            page_size,
            purpose,
        } => {
            let result = collect_all(service, &filter, kind, page_size).await;
            match purpose {
                CollectPurpose::Purge => Command::PurgeCollected(result),
                CollectPurpose::Export(date) => Command::ExportCollected { kind, date, result },
            }
        }
        Effect::OpenFolder(id) => {
            let result = service.open_folder(&id).await;
            Command::FolderOpened { id, result }
        }
        Effect::FetchConfig => Command::ConfigArrived(service.config().await),
        Effect::SaveConfig(config) => Command::ConfigSaved(service.save_config(&config).await),
        Effect::ScheduleSearch { .. } | Effect::SaveFile(_) | Effect::CopyText(_) => return None,
    };
    Some(command)
}
