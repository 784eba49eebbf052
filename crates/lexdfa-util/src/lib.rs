// declares a dense u32 index newtype, plus Index/IndexMut for every listed element type
#[macro_export]
macro_rules! make_type_idx {
    ($vis:vis $type_idx_name:ident $(=> $($type_name:ty),+ )?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        $vis struct $type_idx_name(pub u32);

        impl $type_idx_name {
            pub const fn new(raw: u32) -> $type_idx_name {
                $type_idx_name(raw)
            }

            pub const fn index(self) -> usize {
                self.0 as usize
            }

            pub fn from_push<T>(vec: &mut Vec<T>, val: T) -> $type_idx_name {
                let idx = $type_idx_name(vec.len() as u32);
                vec.push(val);
                idx
            }
        }

        impl From<u32> for $type_idx_name {
            fn from(raw: u32) -> $type_idx_name {
                $type_idx_name(raw)
            }
        }

        impl std::fmt::Display for $type_idx_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        $($(
        impl std::ops::Index<$type_idx_name> for [$type_name] {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for [$type_name] {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self[index.0 as usize]
            }
        }

        impl std::ops::Index<$type_idx_name> for Vec<$type_name> {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self.as_slice()[index]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for Vec<$type_name> {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self.as_mut_slice()[index]
            }
        }
        )+)?
    };
}
