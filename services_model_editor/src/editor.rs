//! The model editor

use crate::{registry_for_theory, CellAction, CellView, EditorError};
use cell_commands::{plan_insertion, CommandRegistry, ConstructorDescriptor, Insertion};
use core_types::{CellId, EntityId};
use double_theory::{TheoryEntry, TheoryLibrary};
use input_types::{KeyCode, KeyEvent, Modifiers};
use model_core::{
    ModelJudgment, NameIndex, NameResolution, ValidatedModel, ValidationEngine, ValidationError,
    ValidationReport,
};
use notebook_core::{
    ActiveCursor, Cell, CellContent, CellStore, CellTag, DeleteDirection, Notebook,
    NotebookSnapshot, StructuralError,
};
use notebook_settings::EditorConfig;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A constructor ran and produced this cell
    Inserted(CellId),
    /// The active cell changed
    Moved,
    /// Nothing changed
    Ignored,
}

/// Editor for a model notebook under one theory
///
/// Owns the cell store and the cursor, and keeps the name index and
/// validation report current: every method that commits a change rebuilds
/// them before returning.
#[derive(Debug)]
pub struct ModelEditor {
    store: CellStore<ModelJudgment>,
    cursor: ActiveCursor,
    theory: Arc<TheoryEntry>,
    commands: CommandRegistry<ModelJudgment>,
    config: EditorConfig,
    engine: ValidationEngine,
    names: NameIndex,
    report: ValidationReport,
}

impl ModelEditor {
    /// Creates an editor over an empty notebook
    pub fn new(theory: Arc<TheoryEntry>, config: EditorConfig) -> Self {
        let notebook = Notebook::new(config.default_name.clone());
        Self::with_notebook(theory, config, notebook)
    }

    /// Creates an editor over an existing notebook, with no cell active
    pub fn with_notebook(
        theory: Arc<TheoryEntry>,
        config: EditorConfig,
        notebook: Notebook<ModelJudgment>,
    ) -> Self {
        let commands = registry_for_theory(&theory, &config.keybindings);
        let engine = ValidationEngine::new().with_ambiguity_warnings(config.warn_ambiguous_names);
        let mut editor = Self {
            store: CellStore::new(notebook),
            cursor: ActiveCursor::new(),
            theory,
            commands,
            config,
            engine,
            names: NameIndex::default(),
            report: ValidationReport::default(),
        };
        editor.refresh();
        editor
    }

    /// Creates an editor for the theory named in the config
    pub fn from_library(
        library: &TheoryLibrary,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let theory = library
            .get(&config.theory.as_str().into())
            .ok_or_else(|| EditorError::UnknownTheory(config.theory.clone()))?;
        Ok(Self::new(theory, config))
    }

    pub fn notebook(&self) -> &Notebook<ModelJudgment> {
        self.store.notebook()
    }

    pub fn cursor(&self) -> &ActiveCursor {
        &self.cursor
    }

    pub fn theory(&self) -> &Arc<TheoryEntry> {
        &self.theory
    }

    pub fn commands(&self) -> &CommandRegistry<ModelJudgment> {
        &self.commands
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The active cell, if any
    pub fn active_cell(&self) -> Option<&Cell<ModelJudgment>> {
        self.cursor.active().and_then(|i| self.store.cell(i))
    }

    /// Index of the active cell
    pub fn active_index(&self) -> Result<usize, EditorError> {
        self.cursor.active().ok_or(EditorError::NoActiveCell)
    }

    /// Entity ID of the judgment in the active cell
    pub fn active_entity(&self) -> Result<EntityId, EditorError> {
        let i = self.active_index()?;
        self.store
            .cell(i)
            .and_then(Cell::as_formal)
            .map(ModelJudgment::id)
            .ok_or(EditorError::NotAJudgment(i))
    }

    /// Switches to another theory and revalidates
    ///
    /// Judgments are kept as they are; those that do not fit the new
    /// theory show up as errors.
    pub fn set_theory(&mut self, theory: Arc<TheoryEntry>) {
        tracing::debug!(theory = %theory.id, "switching theory");
        self.commands = registry_for_theory(&theory, &self.config.keybindings);
        self.theory = theory;
        self.refresh();
    }

    /// Inserts a cell at `pos`, which becomes active unless disabled in the config
    pub fn insert_cell(
        &mut self,
        pos: usize,
        cell: Cell<ModelJudgment>,
    ) -> Result<(), EditorError> {
        self.store
            .transact("insert", |nb| {
                ensure_new_entity(nb, &cell, None)?;
                nb.insert_cell(pos, cell)
            })
            .map_err(rejected)?;
        self.cursor.on_insert(pos);
        if self.config.activate_new_cells {
            self.cursor.has_focused(pos);
        }
        self.refresh();
        Ok(())
    }

    /// Replaces the cell at `pos`; the cursor does not move
    pub fn replace_cell(
        &mut self,
        pos: usize,
        cell: Cell<ModelJudgment>,
    ) -> Result<Cell<ModelJudgment>, EditorError> {
        let old = self
            .store
            .transact("replace", |nb| {
                ensure_new_entity(nb, &cell, Some(pos))?;
                nb.replace_cell(pos, cell)
            })
            .map_err(rejected)?;
        self.refresh();
        Ok(old)
    }

    /// Deletes cell `i`, focusing the cell above
    pub fn delete_backward(&mut self, i: usize) -> Result<Cell<ModelJudgment>, EditorError> {
        self.delete(i, DeleteDirection::Backward)
    }

    /// Deletes cell `i`, focusing the cell that takes its place
    pub fn delete_forward(&mut self, i: usize) -> Result<Cell<ModelJudgment>, EditorError> {
        self.delete(i, DeleteDirection::Forward)
    }

    fn delete(
        &mut self,
        i: usize,
        direction: DeleteDirection,
    ) -> Result<Cell<ModelJudgment>, EditorError> {
        let removed = self.store.delete_at(i).map_err(rejected)?;
        self.cursor.on_delete(i, direction, self.store.len());
        self.refresh();
        Ok(removed)
    }

    /// Handles an action sent by the renderer of cell `i`
    pub fn perform(&mut self, i: usize, action: CellAction) -> Result<(), EditorError> {
        let len = self.store.len();
        if i >= len {
            return Err(EditorError::CellOutOfRange { index: i, len });
        }
        // actions come from a focused cell
        self.focus(i);
        match action {
            CellAction::ActivateAbove => self.cursor.activate_above(),
            CellAction::ActivateBelow => self.cursor.activate_below(len),
            CellAction::DeleteBackward => {
                self.delete_backward(i)?;
            }
            CellAction::DeleteForward => {
                self.delete_forward(i)?;
            }
            CellAction::HasFocused => {}
        }
        Ok(())
    }

    /// Constructors available for the active cell
    pub fn commands_for_active(&self) -> Vec<&ConstructorDescriptor> {
        self.commands
            .commands_for(self.active_tag())
            .into_iter()
            .map(|c| c.descriptor())
            .collect()
    }

    /// Runs a constructor by name, placing the new cell relative to the active one
    pub fn run_command(&mut self, name: &str) -> Result<CellId, EditorError> {
        let active_tag = self.active_tag();
        let cell = self
            .commands
            .commands_for(active_tag)
            .into_iter()
            .find(|c| c.name() == name)
            .map(|c| c.construct())
            .ok_or_else(|| EditorError::UnknownCommand(name.to_string()))?;
        self.place(cell, active_tag)
    }

    /// Runs the constructor bound to a key, or moves the cursor on Up/Down
    pub fn handle_key(&mut self, event: &KeyEvent) -> Result<KeyOutcome, EditorError> {
        let active_tag = self.active_tag();
        if let Some(constructor) = self.commands.find_by_shortcut(event, active_tag) {
            tracing::debug!(command = constructor.name(), "shortcut matched");
            let cell = constructor.construct();
            return self.place(cell, active_tag).map(KeyOutcome::Inserted);
        }

        if event.is_released() || event.modifiers != Modifiers::NONE {
            return Ok(KeyOutcome::Ignored);
        }
        let before = self.cursor.active();
        match event.code {
            KeyCode::Up => self.cursor.activate_above(),
            KeyCode::Down => self.cursor.activate_below(self.store.len()),
            KeyCode::Escape => self.cursor.clear(),
            _ => return Ok(KeyOutcome::Ignored),
        }
        if self.cursor.active() == before {
            Ok(KeyOutcome::Ignored)
        } else {
            Ok(KeyOutcome::Moved)
        }
    }

    /// Edits a judgment in place, in one transaction
    ///
    /// The judgment keeps its entity ID; an update that changes it is
    /// rejected and nothing is committed.
    pub fn update_judgment(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut ModelJudgment),
    ) -> Result<(), EditorError> {
        let (pos, mut judgment) = self
            .store
            .cells()
            .iter()
            .enumerate()
            .find_map(|(pos, cell)| {
                cell.as_formal()
                    .filter(|j| j.id() == id)
                    .map(|j| (pos, j.clone()))
            })
            .ok_or(EditorError::UnknownEntity(id))?;

        f(&mut judgment);
        if judgment.id() != id {
            tracing::warn!(%id, "update tried to change a judgment id");
            return Err(EditorError::IdentityChanged(id));
        }

        self.store
            .modify_at(pos, |content| *content = CellContent::Formal(judgment))
            .map_err(rejected)?;
        self.refresh();
        Ok(())
    }

    /// Renames an object or morphism
    pub fn rename(&mut self, id: EntityId, name: impl Into<String>) -> Result<(), EditorError> {
        let name = name.into();
        self.update_judgment(id, |judgment| judgment.set_name(name))
    }

    /// Points a morphism's domain and codomain at objects
    pub fn set_endpoints(
        &mut self,
        id: EntityId,
        dom: Option<EntityId>,
        cod: Option<EntityId>,
    ) -> Result<(), EditorError> {
        match self.judgment(id) {
            None => return Err(EditorError::UnknownEntity(id)),
            Some(ModelJudgment::Object(_)) => return Err(EditorError::NotAMorphism(id)),
            Some(ModelJudgment::Morphism(_)) => {}
        }
        self.update_judgment(id, |judgment| {
            if let ModelJudgment::Morphism(decl) = judgment {
                decl.dom = dom;
                decl.cod = cod;
            }
        })
    }

    /// Adopts a notebook changed elsewhere
    ///
    /// A notebook that repeats a cell or entity ID is refused and the
    /// current one is kept.
    pub fn apply_remote(&mut self, notebook: Notebook<ModelJudgment>) -> Result<(), EditorError> {
        if let Some(err) = first_duplicate(&notebook) {
            return Err(rejected(err));
        }
        self.store.apply_remote(notebook);
        self.cursor.clamp(self.store.len());
        self.refresh();
        Ok(())
    }

    /// Views of every cell for rendering
    pub fn cell_views(&self) -> Vec<CellView<'_>> {
        self.store
            .cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| CellView {
                index,
                cell,
                is_active: self.cursor.is_active(index),
                errors: cell
                    .as_formal()
                    .map(|j| self.report.errors_for(j.id()))
                    .unwrap_or(&[]),
            })
            .collect()
    }

    /// Errors of one judgment
    pub fn errors_for(&self, id: EntityId) -> &[ValidationError] {
        self.report.errors_for(id)
    }

    /// The validated model, absent while any judgment has errors
    pub fn validated_model(&self) -> Option<&ValidatedModel> {
        self.report.model.as_ref()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn name_index(&self) -> &NameIndex {
        &self.names
    }

    /// Resolves an object name to the first object carrying it
    pub fn resolve_name(&self, name: &str) -> Option<NameResolution> {
        let resolution = self.names.resolve(name)?;
        if resolution.ambiguous {
            tracing::warn!(name, id = %resolution.id, "ambiguous name resolved to first match");
        }
        Some(resolution)
    }

    /// Judgment with the given ID
    pub fn judgment(&self, id: EntityId) -> Option<&ModelJudgment> {
        self.notebook().formal_content().find(|j| j.id() == id)
    }

    pub fn snapshot(&self) -> NotebookSnapshot {
        NotebookSnapshot::capture(self.store.notebook(), &self.cursor, self.store.revision())
    }

    fn active_tag(&self) -> Option<CellTag> {
        self.active_cell().map(Cell::tag)
    }

    fn focus(&mut self, i: usize) {
        if !self.cursor.is_active(i) {
            self.cursor.has_focused(i);
        }
    }

    /// Places a cell the way a constructor would: over an active stem,
    /// otherwise after the active cell or at the end
    pub fn place_cell(&mut self, cell: Cell<ModelJudgment>) -> Result<CellId, EditorError> {
        let active_tag = self.active_tag();
        self.place(cell, active_tag)
    }

    fn place(
        &mut self,
        cell: Cell<ModelJudgment>,
        active_tag: Option<CellTag>,
    ) -> Result<CellId, EditorError> {
        let id = cell.id;
        match plan_insertion(self.cursor.active(), active_tag, self.store.len()) {
            Insertion::ReplaceStem(i) => {
                self.replace_cell(i, cell)?;
                self.cursor.has_focused(i);
            }
            Insertion::InsertAt(pos) => self.insert_cell(pos, cell)?,
        }
        Ok(id)
    }

    fn refresh(&mut self) {
        let judgments: Vec<ModelJudgment> =
            self.store.notebook().formal_content().cloned().collect();
        self.names = NameIndex::build(&judgments);
        self.report = self.engine.validate(&self.theory.theory, &judgments, &self.names);
        tracing::trace!(
            revision = self.store.revision(),
            judgments = judgments.len(),
            invalid = self.report.errors.len(),
            "derived state rebuilt"
        );
    }
}

/// Fails if `cell` declares an entity already declared outside position `skip`
fn ensure_new_entity(
    notebook: &Notebook<ModelJudgment>,
    cell: &Cell<ModelJudgment>,
    skip: Option<usize>,
) -> Result<(), StructuralError> {
    let Some(id) = cell.as_formal().map(ModelJudgment::id) else {
        return Ok(());
    };
    let taken = notebook
        .cells()
        .iter()
        .enumerate()
        .filter(|(pos, _)| Some(*pos) != skip)
        .filter_map(|(_, other)| other.as_formal())
        .any(|judgment| judgment.id() == id);
    if taken {
        Err(StructuralError::DuplicateEntityId(id))
    } else {
        Ok(())
    }
}

fn first_duplicate(notebook: &Notebook<ModelJudgment>) -> Option<StructuralError> {
    let mut cells = BTreeSet::new();
    let mut entities = BTreeSet::new();
    for cell in notebook.cells() {
        if !cells.insert(cell.id) {
            return Some(StructuralError::DuplicateCellId(cell.id));
        }
        if let Some(id) = cell.as_formal().map(ModelJudgment::id) {
            if !entities.insert(id) {
                return Some(StructuralError::DuplicateEntityId(id));
            }
        }
    }
    None
}

fn rejected(err: StructuralError) -> EditorError {
    tracing::warn!(%err, "structural mutation rejected");
    EditorError::Structural(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use double_theory::stdlib::default_library;
    use model_core::ObjectDecl;
    use double_theory::ObType;

    fn editor() -> ModelEditor {
        ModelEditor::from_library(&default_library(), EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_from_library_unknown_theory() {
        let config = EditorConfig {
            theory: "nope".to_string(),
            ..EditorConfig::default()
        };
        let err = ModelEditor::from_library(&default_library(), config).unwrap_err();
        assert_eq!(err, EditorError::UnknownTheory("nope".to_string()));
    }

    #[test]
    fn test_new_editor_is_empty_and_valid() {
        let editor = editor();
        assert!(editor.is_empty());
        assert_eq!(editor.notebook().name, "Untitled");
        assert!(editor.cursor().is_unselected());
        assert!(editor.report().is_valid());
        assert!(editor.validated_model().is_some());
    }

    #[test]
    fn test_run_command_appends_and_activates() {
        let mut editor = editor();
        let first = editor.run_command("Entity").unwrap();
        let second = editor.run_command("Text").unwrap();

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.notebook().cells()[0].id, first);
        assert_eq!(editor.notebook().cells()[1].id, second);
        assert_eq!(editor.cursor().active(), Some(1));
    }

    #[test]
    fn test_run_command_on_stem_replaces_it() {
        let mut editor = editor();
        editor.run_command("Stem").unwrap();
        assert_eq!(editor.active_cell().map(Cell::tag), Some(CellTag::Stem));

        let id = editor.run_command("Entity").unwrap();
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.notebook().cells()[0].id, id);
        assert_eq!(editor.cursor().active(), Some(0));
    }

    #[test]
    fn test_stem_command_hidden_on_stem() {
        let mut editor = editor();
        editor.run_command("Stem").unwrap();
        assert!(editor.commands_for_active().iter().all(|d| d.name != "Stem"));
        assert_eq!(
            editor.run_command("Stem"),
            Err(EditorError::UnknownCommand("Stem".to_string()))
        );
    }

    #[test]
    fn test_insert_out_of_range_is_rejected() {
        let mut editor = editor();
        let err = editor.insert_cell(3, Cell::stem()).unwrap_err();
        assert!(matches!(err, EditorError::Structural(_)));
        assert!(editor.is_empty());
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_insert_without_activation() {
        let config = EditorConfig {
            activate_new_cells: false,
            ..EditorConfig::default()
        };
        let mut editor = ModelEditor::from_library(&default_library(), config).unwrap();
        editor.insert_cell(0, Cell::stem()).unwrap();
        assert!(editor.cursor().is_unselected());
    }

    #[test]
    fn test_handle_key_navigation() {
        let mut editor = editor();
        editor.run_command("Text").unwrap();
        editor.run_command("Text").unwrap();

        let up = KeyEvent::pressed(KeyCode::Up, Modifiers::NONE);
        assert_eq!(editor.handle_key(&up), Ok(KeyOutcome::Moved));
        assert_eq!(editor.cursor().active(), Some(0));
        assert_eq!(editor.handle_key(&up), Ok(KeyOutcome::Ignored));

        let down = KeyEvent::pressed(KeyCode::Down, Modifiers::NONE);
        assert_eq!(editor.handle_key(&down), Ok(KeyOutcome::Moved));
        assert_eq!(editor.cursor().active(), Some(1));

        let released = KeyEvent::released(KeyCode::Up, Modifiers::NONE);
        assert_eq!(editor.handle_key(&released), Ok(KeyOutcome::Ignored));
    }

    #[test]
    fn test_handle_key_runs_shortcut() {
        let mut editor = editor();
        let press_e = KeyEvent::pressed(KeyCode::E, Modifiers::NONE);
        let outcome = editor.handle_key(&press_e).unwrap();

        let KeyOutcome::Inserted(id) = outcome else {
            panic!("expected an insertion, got {outcome:?}");
        };
        let cell = editor.notebook().cell(0).unwrap();
        assert_eq!(cell.id, id);
        assert_eq!(
            cell.as_formal().and_then(ModelJudgment::as_object).map(|o| &o.ob_type),
            Some(&ObType::basic("Entity"))
        );
    }

    #[test]
    fn test_update_judgment_keeps_identity() {
        let mut editor = editor();
        let decl = ObjectDecl::new("X", ObType::basic("Entity"));
        let id = decl.id;
        editor.insert_cell(0, Cell::formal(decl.into())).unwrap();

        editor.rename(id, "Y").unwrap();
        assert_eq!(editor.name_index().lookup("Y"), Some(id));
        assert_eq!(editor.name_index().lookup("X"), None);

        let before = editor.revision();
        let err = editor
            .update_judgment(id, |j| {
                *j = ObjectDecl::new("Z", ObType::basic("Entity")).into();
            })
            .unwrap_err();
        assert_eq!(err, EditorError::IdentityChanged(id));
        assert_eq!(editor.revision(), before);
        assert_eq!(editor.judgment(id).map(ModelJudgment::name), Some("Y"));
    }

    #[test]
    fn test_reused_entity_id_is_rejected() {
        let mut editor = editor();
        let decl = ObjectDecl::new("A", ObType::basic("Entity"));
        let id = decl.id;
        editor.insert_cell(0, Cell::formal(decl.clone().into())).unwrap();

        let copy = ObjectDecl {
            name: "B".to_string(),
            ..decl.clone()
        };
        let before = editor.revision();
        let err = editor
            .insert_cell(1, Cell::formal(copy.clone().into()))
            .unwrap_err();
        assert_eq!(err, EditorError::Structural(StructuralError::DuplicateEntityId(id)));
        assert_eq!(editor.revision(), before);
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.name_index().lookup("A"), Some(id));

        // Replacing the declaring cell itself keeps the ID legal
        editor.replace_cell(0, Cell::formal(copy.into())).unwrap();
        assert_eq!(editor.name_index().lookup("B"), Some(id));

        editor.insert_cell(1, Cell::stem()).unwrap();
        assert_eq!(
            editor.replace_cell(1, Cell::formal(decl.into())),
            Err(EditorError::Structural(StructuralError::DuplicateEntityId(id)))
        );
    }

    #[test]
    fn test_apply_remote_refuses_reused_entity_id() {
        let mut editor = editor();
        editor.run_command("Entity").unwrap();
        let before = editor.revision();

        let decl = ObjectDecl::new("A", ObType::basic("Entity"));
        let copy = ObjectDecl {
            name: "B".to_string(),
            ..decl.clone()
        };
        let remote = Notebook::with_cells(
            "Remote",
            [Cell::formal(decl.clone().into()), Cell::formal(copy.into())],
        )
        .unwrap();

        assert_eq!(
            editor.apply_remote(remote),
            Err(EditorError::Structural(StructuralError::DuplicateEntityId(decl.id)))
        );
        assert_eq!(editor.revision(), before);
        assert_eq!(editor.notebook().name, "Untitled");
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_set_endpoints_on_object_is_rejected() {
        let mut editor = editor();
        let object = ObjectDecl::new("X", ObType::basic("Entity"));
        let id = object.id;
        editor.insert_cell(0, Cell::formal(object.into())).unwrap();

        let before = editor.revision();
        assert_eq!(
            editor.set_endpoints(id, Some(id), Some(id)),
            Err(EditorError::NotAMorphism(id))
        );
        assert_eq!(editor.revision(), before);

        let missing = EntityId::new();
        assert_eq!(
            editor.set_endpoints(missing, None, None),
            Err(EditorError::UnknownEntity(missing))
        );
    }

    #[test]
    fn test_active_entity() {
        let mut editor = editor();
        assert_eq!(editor.active_entity(), Err(EditorError::NoActiveCell));
        editor.run_command("Text").unwrap();
        assert_eq!(editor.active_entity(), Err(EditorError::NotAJudgment(0)));
        editor.run_command("Entity").unwrap();
        let id = editor.active_entity().unwrap();
        assert!(editor.judgment(id).and_then(ModelJudgment::as_object).is_some());
    }

    #[test]
    fn test_update_unknown_entity() {
        let mut editor = editor();
        let id = EntityId::new();
        assert_eq!(editor.rename(id, "X"), Err(EditorError::UnknownEntity(id)));
    }

    #[test]
    fn test_perform_out_of_range() {
        let mut editor = editor();
        assert_eq!(
            editor.perform(0, CellAction::HasFocused),
            Err(EditorError::CellOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_set_theory_rebuilds_commands_and_report() {
        let library = default_library();
        let mut editor = editor();
        editor.run_command("Entity").unwrap();
        assert!(editor.report().is_valid());

        let olog = library.get(&"simple-olog".into()).unwrap();
        editor.set_theory(olog);
        assert!(editor.commands().get("Entity").is_none());
        assert!(editor.commands().get("Type").is_some());
        assert!(!editor.report().is_valid());
        assert!(editor.validated_model().is_none());
    }
}
