//! Console session over a model editor

use crate::commands::{CliError, NotebookCommand, HELP};
use double_theory::{TheoryId, TheoryLibrary, TheorySchema, TheoryType};
use model_core::ModelJudgment;
use notebook_core::{Cell, CellContent, Notebook};
use services_model_editor::{CellAction, CellView, EditorError, ModelEditor};
use std::fmt::Write;
use std::fs;

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Text(String),
    Quit,
}

/// A running console session
pub struct Session {
    editor: ModelEditor,
    library: TheoryLibrary,
}

impl Session {
    /// Creates a new session
    pub fn new(editor: ModelEditor, library: TheoryLibrary) -> Self {
        Self { editor, library }
    }

    pub fn editor(&self) -> &ModelEditor {
        &self.editor
    }

    /// Executes one command
    pub fn execute(&mut self, command: NotebookCommand) -> Result<Response, CliError> {
        let text = match command {
            NotebookCommand::New { constructor } => {
                self.editor.run_command(&constructor)?;
                self.render_list()
            }
            NotebookCommand::Note { text } => {
                self.editor.place_cell(Cell::rich_text(text))?;
                self.render_list()
            }
            NotebookCommand::Name { name } => {
                let id = self.editor.active_entity()?;
                self.editor.rename(id, name)?;
                self.render_list()
            }
            NotebookCommand::Dom { object } => {
                self.set_endpoint(&object, true)?;
                self.render_list()
            }
            NotebookCommand::Cod { object } => {
                self.set_endpoint(&object, false)?;
                self.render_list()
            }
            NotebookCommand::Up => {
                let i = self.editor.active_index()?;
                self.editor.perform(i, CellAction::ActivateAbove)?;
                self.render_list()
            }
            NotebookCommand::Down => {
                let i = self.editor.active_index()?;
                self.editor.perform(i, CellAction::ActivateBelow)?;
                self.render_list()
            }
            NotebookCommand::Focus { index } => {
                self.editor.perform(index, CellAction::HasFocused)?;
                self.render_list()
            }
            NotebookCommand::Delete => {
                let i = self.editor.active_index()?;
                self.editor.perform(i, CellAction::DeleteBackward)?;
                self.render_list()
            }
            NotebookCommand::DeleteForward => {
                let i = self.editor.active_index()?;
                self.editor.perform(i, CellAction::DeleteForward)?;
                self.render_list()
            }
            NotebookCommand::List => self.render_list(),
            NotebookCommand::Check => self.render_check(),
            NotebookCommand::Commands => self.render_commands(),
            NotebookCommand::Search { query } => {
                let matches = self.editor.commands().filter(&query);
                if matches.is_empty() {
                    format!("No constructors match '{}'", query)
                } else {
                    matches
                        .iter()
                        .map(|c| c.name().to_string())
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            NotebookCommand::Theories => self.render_theories(),
            NotebookCommand::Theory { id } => {
                let theory = self
                    .library
                    .get(&TheoryId::new(id.as_str()))
                    .ok_or(EditorError::UnknownTheory(id))?;
                let name = theory.name.clone();
                self.editor.set_theory(theory);
                format!("Switched to {}", name)
            }
            NotebookCommand::Save { path } => {
                let json = serde_json::to_string_pretty(self.editor.notebook())?;
                fs::write(&path, json)?;
                format!("Saved {} cells to {}", self.editor.len(), path)
            }
            NotebookCommand::Load { path } => {
                let bytes = fs::read(&path)?;
                let notebook: Notebook<ModelJudgment> = serde_json::from_slice(&bytes)?;
                self.editor
                    .apply_remote(notebook)
                    .map_err(|err| CliError::InvalidNotebook(err.to_string()))?;
                self.render_list()
            }
            NotebookCommand::Help => HELP.to_string(),
            NotebookCommand::Quit => return Ok(Response::Quit),
        };
        Ok(Response::Text(text))
    }

    fn set_endpoint(&mut self, object: &str, dom: bool) -> Result<(), CliError> {
        let id = self.editor.active_entity()?;
        let target = self
            .editor
            .resolve_name(object)
            .ok_or_else(|| CliError::UnknownObject(object.to_string()))?
            .id;
        let decl = self
            .editor
            .judgment(id)
            .and_then(ModelJudgment::as_morphism)
            .ok_or(EditorError::NotAMorphism(id))?;
        let (new_dom, new_cod) = if dom {
            (Some(target), decl.cod)
        } else {
            (decl.dom, Some(target))
        };
        self.editor.set_endpoints(id, new_dom, new_cod)?;
        Ok(())
    }

    fn render_list(&self) -> String {
        if self.editor.is_empty() {
            return "(empty notebook)".to_string();
        }
        let mut out = String::new();
        for view in self.editor.cell_views() {
            let marker = if view.is_active { '>' } else { ' ' };
            let _ = write!(out, "{} {:>3} {}", marker, view.index, self.describe(&view));
            for error in view.errors {
                let _ = write!(out, "  ! {}", error);
            }
            out.push('\n');
        }
        out.pop();
        out
    }

    fn describe(&self, view: &CellView<'_>) -> String {
        match &view.cell.content {
            CellContent::RichText(text) => format!("text: {}", text.as_str()),
            CellContent::Stem => "(stem)".to_string(),
            CellContent::Formal(ModelJudgment::Object(decl)) => {
                let kind = self.kind_name(&TheoryType::ObType(decl.ob_type.clone()));
                format!("[{}] {}", kind, display_name(&decl.name))
            }
            CellContent::Formal(ModelJudgment::Morphism(decl)) => {
                let kind = self.kind_name(&TheoryType::MorType(decl.mor_type.clone()));
                let names = self.editor.name_index();
                let endpoint = |id: Option<_>| {
                    id.and_then(|id| names.name_of(id))
                        .map(display_name)
                        .unwrap_or("?")
                };
                format!(
                    "[{}] {}: {} -> {}",
                    kind,
                    display_name(&decl.name),
                    endpoint(decl.dom),
                    endpoint(decl.cod)
                )
            }
        }
    }

    fn kind_name(&self, ty: &TheoryType) -> String {
        self.editor
            .theory()
            .theory
            .metadata(ty)
            .map(|meta| meta.name.clone())
            .unwrap_or_else(|| ty.to_string())
    }

    fn render_check(&self) -> String {
        let report = self.editor.report();
        let mut out = match &report.model {
            Some(model) => format!(
                "Valid: {} objects, {} morphisms",
                model.object_count(),
                model.morphism_count()
            ),
            None => format!(
                "Invalid: {} errors in {} judgments",
                report.error_count(),
                report.errors.len()
            ),
        };
        for (name, ids) in self.editor.name_index().ambiguous_names() {
            let _ = write!(out, "\nwarning: {} objects named '{}'", ids.len(), name);
        }
        out
    }

    fn render_commands(&self) -> String {
        self.editor
            .commands_for_active()
            .iter()
            .map(|d| match &d.shortcut {
                Some(shortcut) => format!("{} ({})", d.name, shortcut),
                None => d.name.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_theories(&self) -> String {
        let current = &self.editor.theory().id;
        self.library
            .list()
            .iter()
            .map(|entry| {
                let marker = if &entry.id == current { '*' } else { ' ' };
                format!("{} {} - {}", marker, entry.id, entry.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_command;
    use double_theory::stdlib::default_library;
    use double_theory::ObType;
    use model_core::ObjectDecl;
    use notebook_settings::EditorConfig;

    fn session() -> Session {
        let library = default_library();
        let editor = ModelEditor::from_library(&library, EditorConfig::default()).unwrap();
        Session::new(editor, library)
    }

    fn run(session: &mut Session, line: &str) -> Result<String, CliError> {
        match session.execute(parse_command(line)?)? {
            Response::Text(text) => Ok(text),
            Response::Quit => Ok("quit".to_string()),
        }
    }

    #[test]
    fn test_build_schema_by_name() {
        let mut session = session();
        for line in [
            "new Entity",
            "name X",
            "new Entity",
            "name Y",
            "new Mapping",
            "name f",
            "dom X",
            "cod Y",
        ] {
            run(&mut session, line).unwrap();
        }

        let listing = run(&mut session, "list").unwrap();
        assert!(listing.contains("[Mapping] f: X -> Y"));
        assert!(!listing.contains('!'));
        assert_eq!(
            run(&mut session, "check").unwrap(),
            "Valid: 2 objects, 1 morphisms"
        );
    }

    #[test]
    fn test_errors_are_listed() {
        let mut session = session();
        run(&mut session, "new Mapping").unwrap();
        let listing = run(&mut session, "list").unwrap();
        assert!(listing.contains("[Mapping] (unnamed): ? -> ?"));
        assert!(listing.contains("! Domain is missing"));
        let check = run(&mut session, "check").unwrap();
        assert!(check.starts_with("Invalid: 2 errors in 1 judgments"));
    }

    #[test]
    fn test_dom_on_object_is_rejected() {
        let mut session = session();
        run(&mut session, "new Entity").unwrap();
        run(&mut session, "name X").unwrap();
        assert!(matches!(
            run(&mut session, "dom X"),
            Err(CliError::Editor(EditorError::NotAMorphism(_)))
        ));
        assert!(matches!(run(&mut session, "dom Nope"), Err(CliError::UnknownObject(_))));
    }

    #[test]
    fn test_load_refuses_reused_entity_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        let decl = ObjectDecl::new("A", ObType::basic("Entity"));
        let copy = ObjectDecl {
            name: "B".to_string(),
            ..decl.clone()
        };
        let notebook: Notebook<ModelJudgment> = Notebook::with_cells(
            "Dup",
            [Cell::formal(decl.into()), Cell::formal(copy.into())],
        )
        .unwrap();
        fs::write(&path, serde_json::to_string(&notebook).unwrap()).unwrap();

        let mut session = session();
        run(&mut session, "new Entity").unwrap();
        let line = format!("load {}", path.display());
        assert!(matches!(
            run(&mut session, &line),
            Err(CliError::InvalidNotebook(msg)) if msg.contains("already declared")
        ));
        assert_eq!(session.editor().len(), 1);
        assert_eq!(session.editor().notebook().name, "Untitled");
    }

    #[test]
    fn test_navigation_requires_active_cell() {
        let mut session = session();
        assert!(matches!(
            run(&mut session, "up"),
            Err(CliError::Editor(EditorError::NoActiveCell))
        ));
    }

    #[test]
    fn test_switch_theory() {
        let mut session = session();
        let theories = run(&mut session, "theories").unwrap();
        assert!(theories.contains("* simple-schema"));

        run(&mut session, "theory reg-net").unwrap();
        assert!(session.editor().commands().get("Species").is_some());
        assert!(matches!(
            run(&mut session, "theory nope"),
            Err(CliError::Editor(EditorError::UnknownTheory(_)))
        ));
    }

    #[test]
    fn test_quit() {
        let mut session = session();
        assert_eq!(
            session.execute(NotebookCommand::Quit).unwrap(),
            Response::Quit
        );
    }
}
