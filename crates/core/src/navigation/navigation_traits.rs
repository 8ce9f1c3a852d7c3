/// Routing collaborator; moves the application to another path.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
