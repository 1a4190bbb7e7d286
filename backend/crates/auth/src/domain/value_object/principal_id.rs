use kernel::id::Id;

pub struct PrincipalMarker;
pub type PrincipalId = Id<PrincipalMarker>;
