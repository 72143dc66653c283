//! Step mocker - drives a full substitution pass over a workflow

use crate::{
    core::{
        to_yaml, ActionBundle, MockAction, MockError, MockSpec, Step, StepIdentifier,
        Workflow, WorkflowDocument,
    },
    mocker::{
        locator::locate,
        merger::merge,
        resolver::{repository_root, resolve_composite_action_in, resolve_workflow_path},
    },
    storage::WorkflowStore,
};
use indexmap::IndexMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::{debug, info, warn};

type PassFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MockError>> + Send + 'a>>;

/// Rewrites a workflow (and the composite actions it uses) with mocked steps
pub struct StepMocker<S> {
    store: S,
    workflow_file: String,
    cwd: PathBuf,
}

impl<S: WorkflowStore> StepMocker<S> {
    /// Create a mocker for `workflow_file`, looked up relative to `cwd`
    pub fn new(store: S, workflow_file: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            store,
            workflow_file: workflow_file.into(),
            cwd: cwd.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply every substitution in memory without writing anything
    pub async fn plan(&self, spec: &MockSpec) -> Result<MockPlan, MockError> {
        let workflow_path =
            resolve_workflow_path(&self.store, &self.cwd, &self.workflow_file).await?;
        let contents = self.store.read(&workflow_path).await?;

        let mut workflow = match WorkflowDocument::parse(&workflow_path, &contents)? {
            WorkflowDocument::Workflow(workflow) => workflow,
            WorkflowDocument::Action(_) => {
                return Err(MockError::UnsupportedDocumentShape {
                    path: workflow_path,
                    reason: "composite actions cannot be mocked directly; mock the workflow step that uses them"
                        .to_string(),
                })
            }
        };

        if workflow.is_reusable() {
            debug!("{} is a reusable workflow", workflow_path.display());
        }

        let mut pass = Pass {
            store: &self.store,
            root: repository_root(&workflow_path),
            actions: IndexMap::new(),
            editing: Vec::new(),
            substitutions: 0,
        };

        for (job, identifiers) in spec.jobs() {
            let steps = workflow.job_steps_mut(job)?;
            pass.apply(job, steps, identifiers).await?;
        }

        info!(
            "Planned {} substitution(s) across {} composite action(s)",
            pass.substitutions,
            pass.actions.len()
        );

        Ok(MockPlan {
            workflow_path,
            workflow,
            actions: pass.actions,
            substitutions: pass.substitutions,
        })
    }

    /// Apply every substitution and write the touched documents
    ///
    /// Nothing is written unless every substitution succeeds. Returns the
    /// paths written, composite actions first.
    pub async fn mock(&self, spec: &MockSpec) -> Result<Vec<PathBuf>, MockError> {
        let plan = self.plan(spec).await?;
        plan.commit(&self.store).await
    }
}

/// State of one substitution pass
struct Pass<'s, S: ?Sized> {
    store: &'s S,
    root: PathBuf,
    actions: IndexMap<PathBuf, ActionBundle>,
    /// Actions taken out of `actions` while their nested identifiers run
    editing: Vec<PathBuf>,
    substitutions: usize,
}

impl<'s, S: WorkflowStore + ?Sized> Pass<'s, S> {
    /// Apply identifiers to one flat step list
    ///
    /// `scope` is the job id, or `<job> > <reference>` inside a composite action.
    fn apply<'a>(
        &'a mut self,
        scope: &'a str,
        steps: &'a mut [Step],
        identifiers: &'a [StepIdentifier],
    ) -> PassFuture<'a> {
        Box::pin(async move {
            for identifier in identifiers {
                let (index, step) = locate(steps, &identifier.selector, scope)?;

                match &identifier.action {
                    MockAction::Replace(payload) => {
                        let mocked = merge(step, payload);
                        debug!("Mocked {} in {}: {}", identifier.selector, scope, mocked.label());
                        steps[index] = mocked;
                        self.substitutions += 1;
                    }
                    MockAction::Composite(nested) => {
                        let reference = match step.local_action() {
                            Some(reference) => reference.to_string(),
                            None => {
                                return Err(MockError::InvalidCompositeReference {
                                    job: scope.to_string(),
                                    selector: identifier.selector.clone(),
                                    uses: step.uses().map(str::to_string),
                                })
                            }
                        };

                        let location =
                            resolve_composite_action_in(self.store, &self.root, &reference).await?;
                        let path = location.path();
                        if self.editing.contains(&path) {
                            return Err(MockError::RecursiveCompositeAction {
                                job: scope.to_string(),
                                path,
                            });
                        }

                        // Reuse the staged copy so edits from earlier identifiers are kept
                        let mut action = match self.actions.shift_remove(&path) {
                            Some(action) => action,
                            None => self.load_action(&path).await?,
                        };

                        let nested_scope = format!("{} > {}", scope, reference);
                        self.editing.push(path.clone());
                        self.apply(&nested_scope, action.steps_mut(), nested).await?;
                        self.editing.pop();
                        self.actions.insert(path, action);
                    }
                }
            }
            Ok(())
        })
    }

    async fn load_action(&self, path: &Path) -> Result<ActionBundle, MockError> {
        let contents = self.store.read(path).await?;
        match WorkflowDocument::parse(path, &contents)? {
            WorkflowDocument::Action(action) => {
                if !action.is_composite() {
                    warn!(
                        "{} is not a composite action (using: {})",
                        path.display(),
                        action.using().unwrap_or("<unset>")
                    );
                }
                Ok(action)
            }
            WorkflowDocument::Workflow(_) => Err(MockError::UnsupportedDocumentShape {
                path: path.to_path_buf(),
                reason: "expected a composite action but found a workflow".to_string(),
            }),
        }
    }
}

/// Mutated documents waiting to be written
#[derive(Debug, Clone)]
pub struct MockPlan {
    workflow_path: PathBuf,
    workflow: Workflow,
    actions: IndexMap<PathBuf, ActionBundle>,
    substitutions: usize,
}

impl MockPlan {
    pub fn workflow_path(&self) -> &Path {
        &self.workflow_path
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Composite actions touched by the pass, keyed by file path
    pub fn actions(&self) -> impl Iterator<Item = (&Path, &ActionBundle)> {
        self.actions.iter().map(|(path, action)| (path.as_path(), action))
    }

    /// Number of steps replaced, including steps inside composite actions
    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    /// Serialize every document, composite actions first
    pub fn render(&self) -> Result<Vec<(PathBuf, String)>, MockError> {
        let mut rendered = Vec::with_capacity(self.actions.len() + 1);

        for (path, action) in &self.actions {
            rendered.push((path.clone(), to_yaml(path, action)?));
        }
        rendered.push((
            self.workflow_path.clone(),
            to_yaml(&self.workflow_path, &self.workflow)?,
        ));

        Ok(rendered)
    }

    /// Write every document, one write each
    ///
    /// All documents are serialized before the first write. Each write is
    /// independent: a failing write does not undo earlier ones.
    pub async fn commit<S>(self, store: &S) -> Result<Vec<PathBuf>, MockError>
    where
        S: WorkflowStore + ?Sized,
    {
        let rendered = self.render()?;
        let mut written = Vec::with_capacity(rendered.len());

        for (path, contents) in rendered {
            store.write(&path, &contents).await?;
            info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}
