pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::tag_builder::*;

pub mod tag_builder {

    use super::*;
    use crate::{tag::*, time::*};

    #[derive(Debug)]
    pub struct TagBuild {
        tag: Tag,
    }

    impl TagBuild {
        pub fn name(mut self, name: &str) -> Self {
            self.tag.name = name.into();
            self
        }
        pub fn count(mut self, count: TagCount) -> Self {
            self.tag.count = count;
            self
        }
        pub fn finish(self) -> Tag {
            self.tag
        }
    }

    impl Builder for Tag {
        type Build = TagBuild;
        fn build() -> TagBuild {
            TagBuild {
                tag: Tag {
                    name: "".into(),
                    count: 0,
                    fetched_at: Timestamp::now(),
                },
            }
        }
    }
}
