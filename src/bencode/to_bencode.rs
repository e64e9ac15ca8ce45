use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use bytes::Bytes;

use super::error::EncodeError;
use super::value::Value;

/// Conversion from a host value into a bencode [`Value`].
///
/// Text becomes its UTF-8 bytes. Sequences become lists and maps become
/// dictionaries whose keys must convert to byte strings. A `Vec<u8>` is a list
/// of integers; wrap it in [`AsBytes`] (or use [`Bytes`]) to get a byte string.
///
/// # Examples
///
/// ```
/// use bcodec::bencode::{AsBytes, EncodeError, ToBencode, Value};
/// use std::collections::BTreeMap;
///
/// assert_eq!("spam".to_bencode().unwrap(), Value::string("spam"));
/// assert_eq!(AsBytes(vec![0xffu8]).to_bencode().unwrap(), Value::from(vec![0xffu8]));
///
/// let mut by_port = BTreeMap::new();
/// by_port.insert(6881u16, "seed");
/// assert!(matches!(
///     by_port.to_bencode(),
///     Err(EncodeError::NonByteStringKey(Value::Integer(6881)))
/// ));
/// ```
pub trait ToBencode {
    fn to_bencode(&self) -> Result<Value, EncodeError>;
}

/// Wrapper that encodes any byte container as a byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsBytes<T>(pub T);

impl<T: AsRef<[u8]>> ToBencode for AsBytes<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(Bytes::copy_from_slice(self.0.as_ref())))
    }
}

impl ToBencode for Value {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(self.clone())
    }
}

impl<T: ToBencode + ?Sized> ToBencode for &T {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        (**self).to_bencode()
    }
}

impl<T: ToBencode + ?Sized> ToBencode for Box<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        (**self).to_bencode()
    }
}

macro_rules! impl_to_bencode_int {
    ($($t:ty),*) => {
        $(
            impl ToBencode for $t {
                fn to_bencode(&self) -> Result<Value, EncodeError> {
                    Ok(Value::Integer(i128::from(*self)))
                }
            }
        )*
    };
}

impl_to_bencode_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl ToBencode for isize {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Integer(*self as i128))
    }
}

impl ToBencode for usize {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Integer(*self as i128))
    }
}

impl ToBencode for u128 {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        i128::try_from(*self)
            .map(Value::Integer)
            .map_err(|_| EncodeError::Unrepresentable(format!("{} (exceeds i128)", self)))
    }
}

impl ToBencode for str {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::string(self))
    }
}

impl ToBencode for String {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::string(self))
    }
}

impl ToBencode for Bytes {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(self.clone()))
    }
}

impl<T: ToBencode> ToBencode for Option<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        match self {
            Some(v) => v.to_bencode(),
            None => Err(EncodeError::Unrepresentable("None".into())),
        }
    }
}

impl<T: ToBencode> ToBencode for [T] {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.iter()
            .map(ToBencode::to_bencode)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }
}

impl<T: ToBencode> ToBencode for Vec<T> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        self.as_slice().to_bencode()
    }
}

impl<K: ToBencode, V: ToBencode> ToBencode for BTreeMap<K, V> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        dict_from_entries(self.iter())
    }
}

impl<K: ToBencode, V: ToBencode, S: BuildHasher> ToBencode for HashMap<K, V, S> {
    fn to_bencode(&self) -> Result<Value, EncodeError> {
        dict_from_entries(self.iter())
    }
}

fn dict_from_entries<'a, K, V, I>(entries: I) -> Result<Value, EncodeError>
where
    K: ToBencode + 'a,
    V: ToBencode + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut dict = BTreeMap::new();
    for (key, value) in entries {
        let key = match key.to_bencode()? {
            Value::Bytes(b) => b,
            other => return Err(EncodeError::NonByteStringKey(other)),
        };
        let value = value.to_bencode()?;
        if dict.contains_key(&key) {
            return Err(EncodeError::DuplicateKey(key));
        }
        dict.insert(key, value);
    }
    Ok(Value::Dict(dict))
}
