//! Maps registered object fields to and from a [`SettingsDocument`].
//!
//! In place of runtime reflection, callers register each persistable
//! field once, with closures that read and write it on the settings
//! object. Registration order is the save order. Failures never abort
//! a whole load or save; they are isolated per field and funnelled to
//! the report hook (or the shared log when no hook is installed).
//!
//! ```
//! use vnml_settings::SettingsMapper;
//!
//! struct EditorSettings {
//!     window_width: i32,
//!     theme: String,
//! }
//!
//! let mut mapper = SettingsMapper::new();
//! mapper
//!     .field(
//!         "windowWidth",
//!         |s: &EditorSettings| s.window_width,
//!         |s, v| s.window_width = v,
//!     )
//!     .default_value(800);
//! mapper.field("theme", |s: &EditorSettings| s.theme.clone(), |s, v| s.theme = v);
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use crate::convert::{ConverterRegistry, SettingValue};
use crate::document::SettingsDocument;
use crate::error::SettingsError;

type ReadFn<T> = Box<dyn Fn(&T, &ConverterRegistry) -> Result<Option<String>, SettingsError>>;
type WriteFn<T> = Box<dyn Fn(&mut T, &str, &ConverterRegistry) -> Result<(), SettingsError>>;

/// One registered field: its name, flags, and type-erased accessors.
struct FieldSlot<T> {
    name: String,
    secure: bool,
    apply_default: Option<Box<dyn Fn(&mut T)>>,
    read: ReadFn<T>,
    write: WriteFn<T>,
}

/// Typed handle returned by field registration.
///
/// Lets the caller attach the secure flag and a declared default
/// before registering the next field.
pub struct FieldHandle<'a, T, V> {
    slot: &'a mut FieldSlot<T>,
    set: Rc<dyn Fn(&mut T, V)>,
}

impl<T: 'static, V: Clone + 'static> FieldHandle<'_, T, V> {
    /// Routes the value through the encryption hooks on save and load.
    pub fn secure(mut self) -> Self {
        self.slot.secure = true;
        self
    }

    /// Declares the default applied when the document has no entry for
    /// this field. The default fires on the first load only.
    pub fn default_value(mut self, value: V) -> Self {
        let set = Rc::clone(&self.set);
        self.slot.apply_default = Some(Box::new(move |object| set(object, value.clone())));
        self
    }
}

/// Persists the registered fields of a settings object `T`.
pub struct SettingsMapper<T> {
    fields: Vec<FieldSlot<T>>,
    converters: ConverterRegistry,
    defaults_applied: HashSet<String>,
    report_exception: Option<Box<dyn Fn(&SettingsError)>>,
    encrypt: Option<Box<dyn Fn(&str, &str) -> String>>,
    decrypt: Option<Box<dyn Fn(&str, &str) -> String>>,
}

impl<T: 'static> Default for SettingsMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SettingsMapper<T> {
    /// Creates a mapper with no fields, hooks or converters.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            converters: ConverterRegistry::default(),
            defaults_applied: HashSet::new(),
            report_exception: None,
            encrypt: None,
            decrypt: None,
        }
    }

    /// Registers a primitive or string field.
    pub fn field<V: SettingValue>(
        &mut self,
        name: &str,
        get: impl Fn(&T) -> V + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> FieldHandle<'_, T, V> {
        let set: Rc<dyn Fn(&mut T, V)> = Rc::new(set);
        let write_set = Rc::clone(&set);
        let write_name = name.to_string();
        let slot = FieldSlot {
            name: name.to_string(),
            secure: false,
            apply_default: None,
            read: Box::new(move |object, _| Ok(Some(get(object).to_string()))),
            write: Box::new(move |object, text, _| match text.parse::<V>() {
                Ok(value) => {
                    write_set(object, value);
                    Ok(())
                }
                Err(_) => Err(SettingsError::Convert {
                    name: write_name.clone(),
                    value: text.to_string(),
                }),
            }),
        };
        self.push_slot(slot, set)
    }

    /// Registers a field that may have no current value.
    ///
    /// An absent value is skipped on save (unless a default is
    /// declared, in which case the default re-applies on load).
    pub fn optional_field<V: SettingValue>(
        &mut self,
        name: &str,
        get: impl Fn(&T) -> Option<V> + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> FieldHandle<'_, T, V> {
        let set: Rc<dyn Fn(&mut T, V)> = Rc::new(set);
        let write_set = Rc::clone(&set);
        let write_name = name.to_string();
        let slot = FieldSlot {
            name: name.to_string(),
            secure: false,
            apply_default: None,
            read: Box::new(move |object, _| Ok(get(object).map(|value| value.to_string()))),
            write: Box::new(move |object, text, _| match text.parse::<V>() {
                Ok(value) => {
                    write_set(object, value);
                    Ok(())
                }
                Err(_) => Err(SettingsError::Convert {
                    name: write_name.clone(),
                    value: text.to_string(),
                }),
            }),
        };
        self.push_slot(slot, set)
    }

    /// Registers a complex-typed field coerced through the converter
    /// registry.
    ///
    /// Without a registered converter the field is left untouched on
    /// load; on save it is skipped and reported.
    pub fn converted_field<V: Clone + 'static>(
        &mut self,
        name: &str,
        get: impl Fn(&T) -> Option<V> + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> FieldHandle<'_, T, V> {
        let set: Rc<dyn Fn(&mut T, V)> = Rc::new(set);
        let write_set = Rc::clone(&set);
        let read_name = name.to_string();
        let write_name = name.to_string();
        let slot = FieldSlot {
            name: name.to_string(),
            secure: false,
            apply_default: None,
            read: Box::new(move |object, converters| match get(object) {
                None => Ok(None),
                Some(value) => match converters.encode::<V>(&value) {
                    Some(text) => Ok(Some(text)),
                    None => Err(SettingsError::MissingConverter {
                        name: read_name.clone(),
                        type_name: std::any::type_name::<V>(),
                    }),
                },
            }),
            write: Box::new(move |object, text, converters| {
                if !converters.contains::<V>() {
                    return Ok(());
                }
                match converters.decode::<V>(text) {
                    Some(value) => {
                        write_set(object, value);
                        Ok(())
                    }
                    None => Err(SettingsError::Convert {
                        name: write_name.clone(),
                        value: text.to_string(),
                    }),
                }
            }),
        };
        self.push_slot(slot, set)
    }

    fn push_slot<V>(
        &mut self,
        slot: FieldSlot<T>,
        set: Rc<dyn Fn(&mut T, V)>,
    ) -> FieldHandle<'_, T, V> {
        let index = self.fields.len();
        self.fields.push(slot);
        FieldHandle {
            slot: &mut self.fields[index],
            set,
        }
    }

    /// Installs the error sink. Without one, reports go to the shared
    /// log at WARN.
    pub fn on_report(&mut self, hook: impl Fn(&SettingsError) + 'static) -> &mut Self {
        self.report_exception = Some(Box::new(hook));
        self
    }

    /// Installs the encryption hook, called as `(field name, plain)`
    /// and returning the stored form.
    pub fn on_encrypt(&mut self, hook: impl Fn(&str, &str) -> String + 'static) -> &mut Self {
        self.encrypt = Some(Box::new(hook));
        self
    }

    /// Installs the decryption hook, called as `(field name, stored)`
    /// and returning the plain form.
    pub fn on_decrypt(&mut self, hook: impl Fn(&str, &str) -> String + 'static) -> &mut Self {
        self.decrypt = Some(Box::new(hook));
        self
    }

    /// The converter registry used by
    /// [`converted_field`](SettingsMapper::converted_field) registrations.
    pub fn converters(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    /// Loads every registered field from `document` into `object`.
    ///
    /// A field with no matching entry falls back to its declared
    /// default, first load only. Per-field failures are reported and
    /// the remaining fields still load.
    pub fn load(&mut self, object: &mut T, document: &SettingsDocument) {
        for index in 0..self.fields.len() {
            let slot = &self.fields[index];
            let result = match document.find(&slot.name) {
                Some(entry) => {
                    let mut value = entry.value.clone();
                    if entry.secure && let Some(decrypt) = &self.decrypt {
                        value = decrypt(&slot.name, &value);
                    }
                    (slot.write)(object, &value, &self.converters)
                }
                None => {
                    if !self.defaults_applied.contains(&slot.name)
                        && let Some(apply) = &slot.apply_default
                    {
                        apply(object);
                    }
                    Ok(())
                }
            };
            if let Err(error) = result {
                self.report(&error);
            }
            let name = self.fields[index].name.clone();
            self.defaults_applied.insert(name);
        }
    }

    /// Reads a JSON settings document from `path` and loads it.
    ///
    /// I/O and parse failures are reported and yield `None`, leaving
    /// `object` untouched.
    pub fn load_path(&mut self, object: &mut T, path: impl AsRef<Path>) -> Option<SettingsDocument> {
        match SettingsDocument::read_from(path) {
            Ok(document) => {
                self.load(object, &document);
                Some(document)
            }
            Err(error) => {
                self.report(&error);
                None
            }
        }
    }

    /// Builds a settings document from the current field values.
    ///
    /// A field whose current value is absent is skipped, as is a field
    /// whose coercion fails (reported).
    pub fn save(&self, object: &T) -> SettingsDocument {
        let mut document = SettingsDocument::default();
        for slot in &self.fields {
            match (slot.read)(object, &self.converters) {
                Ok(Some(mut value)) => {
                    if slot.secure && let Some(encrypt) = &self.encrypt {
                        value = encrypt(&slot.name, &value);
                    }
                    document.push(slot.name.clone(), value, slot.secure);
                }
                Ok(None) => {}
                Err(error) => self.report(&error),
            }
        }
        document
    }

    /// Saves and writes the document to `path` as JSON.
    ///
    /// Write failures are reported; the document is returned either
    /// way.
    pub fn save_path(&self, object: &T, path: impl AsRef<Path>) -> SettingsDocument {
        let document = self.save(object);
        if let Err(error) = document.write_to(path) {
            self.report(&error);
        }
        document
    }

    fn report(&self, error: &SettingsError) {
        match &self.report_exception {
            Some(hook) => hook(error),
            None => vnml_core::log_warn!("settings: {error}"),
        }
    }
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
