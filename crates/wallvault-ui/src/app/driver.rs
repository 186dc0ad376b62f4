//! Browser driver for the catalog reducer.
//!
//! # Design
//! - Every command goes through the yewdux store so components re-render from a
//!   single source of truth.
//! - Service effects run concurrently on the local executor; freshness tickets
//!   decide which arrivals still apply.
//! - One debounce timer is kept; re-arming it drops (and so cancels) the old one.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::platform::spawn_local;
use yewdux::prelude::Dispatch;

use crate::app::host;
use crate::core::store::AppStore;
use crate::features::catalog::actions::{Command, Effect, apply};
use crate::models::ToastKind;
use crate::runtime::execute;
use crate::services::http::HttpCatalogService;

pub(crate) struct CatalogDriver {
    dispatch: Dispatch<AppStore>,
    service: HttpCatalogService,
    search_timer: RefCell<Option<Timeout>>,
}

impl CatalogDriver {
    pub(crate) fn new(dispatch: Dispatch<AppStore>, service: HttpCatalogService) -> Rc<Self> {
        Rc::new(Self {
            dispatch,
            service,
            search_timer: RefCell::new(None),
        })
    }

    /// Apply `command` to the store and start every effect it produced.
    pub(crate) fn send(self: &Rc<Self>, command: Command) {
        let mut command = Some(command);
        let mut effects = Vec::new();
        self.dispatch.reduce_mut(|store| {
            if let Some(command) = command.take() {
                effects = apply(&mut store.catalog, command);
            }
        });
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::ScheduleSearch { token, delay } => {
                let driver = Rc::clone(self);
                let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                let timer = Timeout::new(millis, move || driver.send(Command::SearchQuiet(token)));
                self.search_timer.replace(Some(timer));
            }
            Effect::SaveFile(export) => {
                if let Err(err) = host::download(&export) {
                    tracing::warn!(error = ?err, file = %export.file_name, "download failed");
                    self.dispatch.reduce_mut(|store| {
                        store
                            .catalog
                            .notify(ToastKind::Error, "Export failed: download was blocked");
                    });
                }
            }
            Effect::CopyText(path) => {
                let driver = Rc::clone(self);
                spawn_local(async move {
                    let ok = host::copy_text(&path).await;
                    driver.send(Command::ClipboardWritten { path, ok });
                });
            }
            effect => {
                let driver = Rc::clone(self);
                spawn_local(async move {
                    if let Some(command) = execute(&driver.service, effect).await {
                        driver.send(command);
                    }
                });
            }
        }
    }
}
