//! Single-post command handlers: `show`, `create`, `update`, `delete`.

use super::render::render_post;
use crate::console::Console;
use crate::error::{ConsoleError, Result};
use crate::model::Post;
use crate::source::{CollectionSource, RecordId};

/// Field changes for `create` and `update`.
#[derive(Debug, Clone, Default)]
pub struct PostFields {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Show one post.
pub fn run_show<S: CollectionSource<Post>>(console: &mut Console<S>, id: u64) -> Result<String> {
    console.load()?;
    console.open_detail(&RecordId::from(id))?;
    let out = console
        .dialog()
        .map(|dialog| render_post(dialog.post()))
        .unwrap_or_default();
    console.close_dialog();
    Ok(out)
}

/// Create a post owned by the signed-in user.
pub fn run_create<S: CollectionSource<Post>>(
    console: &mut Console<S>,
    fields: PostFields,
) -> Result<String> {
    console.load()?;
    console.open_new()?;
    console.update_draft(fields.title, fields.body)?;
    console.submit()?;

    let created = console
        .table()
        .state()
        .source()
        .last()
        .map(render_post)
        .unwrap_or_default();
    Ok(with_flash(console, created))
}

/// Update a post; unset fields keep their value.
pub fn run_update<S: CollectionSource<Post>>(
    console: &mut Console<S>,
    id: u64,
    fields: PostFields,
) -> Result<String> {
    let id = RecordId::from(id);
    console.load()?;
    console.open_edit(&id)?;
    console.update_draft(fields.title, fields.body)?;
    console.submit()?;

    let updated = console
        .table()
        .find(&id)
        .map(render_post)
        .ok_or_else(|| ConsoleError::UnknownItem(id.to_string()))?;
    Ok(with_flash(console, updated))
}

/// Delete a post.
pub fn run_delete<S: CollectionSource<Post>>(console: &mut Console<S>, id: u64) -> Result<String> {
    console.load()?;
    console.open_delete(&RecordId::from(id))?;
    console.confirm_delete()?;
    Ok(with_flash(console, String::new()))
}

fn with_flash<S>(console: &mut Console<S>, details: String) -> String {
    match console.flash_mut().take() {
        Some(flash) => format!("{flash}\n{details}"),
        None => details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, User};
    use crate::source::{MemorySource, demo_posts};
    use crate::table::TableOptions;

    fn console(role: Role) -> Console<MemorySource<Post>> {
        Console::new(
            MemorySource::new(demo_posts()),
            Some(User::new(2, "editor@gmail.com", role)),
            TableOptions::default(),
            30,
        )
        .unwrap()
    }

    #[test]
    fn test_show() {
        let out = run_show(&mut console(Role::Reader), 2).unwrap();
        assert_eq!(out, "ID: 2\nUser ID: 1\nTitle: qui est esse\nBody: body of post 2\n");
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut c = console(Role::Editor);
        let fields = PostFields {
            title: Some("renamed".into()),
            body: None,
        };
        let out = run_update(&mut c, 3, fields).unwrap();
        assert!(out.starts_with("Post updated\n"));
        assert!(out.contains("Title: renamed\nBody: body of post 3"));
        // owner becomes the editor
        assert!(out.contains("User ID: 2"));
    }

    #[test]
    fn test_create_requires_admin() {
        let err = run_create(&mut console(Role::Editor), PostFields::default()).unwrap_err();
        assert!(err.is_access_denied());
    }

    #[test]
    fn test_delete() {
        let mut c = console(Role::Admin);
        let out = run_delete(&mut c, 1).unwrap();
        assert_eq!(out, "Post deleted\n");
        assert_eq!(c.source().len(), 11);
    }
}
